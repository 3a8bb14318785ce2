// ==========================================
// 课表排班系统 - 排班领域实体
// ==========================================
// 职责: 排班需求、候选人、排班结果
// 约束: AssignmentResult 返回后不再修改
// ==========================================

use crate::domain::person::PersonRecord;
use crate::domain::types::SlotCoordinate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// 排班需求 (Demand Requirement)
// ==========================================
/// 单个时间槽的人数需求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandRequirement {
    pub slot: SlotCoordinate,
    pub headcount: u32,
}

// ==========================================
// 排班候选人 (Candidate)
// ==========================================
/// 参与排班的人员：身份 + 忙碌时间槽集合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    /// 算法必须避开的时间槽
    pub busy_slots: BTreeSet<SlotCoordinate>,
}

impl Candidate {
    /// 从课表记录派生指定周次的候选人
    pub fn from_record(record: &PersonRecord, week: u32) -> Self {
        Candidate {
            id: record.id.clone(),
            name: record.identity.name.clone(),
            busy_slots: record.busy_slots_in_week(week),
        }
    }

    pub fn is_busy(&self, slot: SlotCoordinate) -> bool {
        self.busy_slots.contains(&slot)
    }
}

// ==========================================
// 排班人选 (Assignee)
// ==========================================
/// 排班结果中的一个人选（只保留身份，不携带忙闲集合）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: String,
    pub name: String,
}

impl From<&Candidate> for Assignee {
    fn from(c: &Candidate) -> Self {
        Assignee {
            id: c.id.clone(),
            name: c.name.clone(),
        }
    }
}

// ==========================================
// 排班结果 (Assignment Result)
// ==========================================
/// 一次排班运行的完整输出
///
/// solution 按时间槽全序遍历，保证结果可复现展示。
/// JSON 形态: {"solution": {"1_2": [...]}, "warnings": [...], "total_demand": N}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub solution: BTreeMap<SlotCoordinate, Vec<Assignee>>,
    /// 人力缺口等提示信息（非错误）
    pub warnings: Vec<String>,
    /// 总需求人次（覆盖率计算用）
    pub total_demand: u32,
}

impl AssignmentResult {
    /// 每名候选人的最终班次数（公平性度量输入）
    pub fn load_per_person(&self, people: &[Candidate]) -> BTreeMap<String, u32> {
        let mut counts: BTreeMap<String, u32> =
            people.iter().map(|p| (p.id.clone(), 0)).collect();
        for assignees in self.solution.values() {
            for a in assignees {
                if let Some(c) = counts.get_mut(&a.id) {
                    *c += 1;
                }
            }
        }
        counts
    }

    /// 实际排入的总人次
    pub fn assigned_count(&self) -> u32 {
        self.solution.values().map(|v| v.len() as u32).sum()
    }
}
