// ==========================================
// 课表排班系统 - 空闲时间分析 API
// ==========================================
// 职责: 批量课表 -> 全员忙闲统计
// 输出: 人员明细 + 元数据集合 + 指定周次的逐槽忙闲网格
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::person::{BusySlotIndex, PersonRecord};
use crate::domain::types::SlotCoordinate;
use crate::importer::ingestor::{FileFailure, ScheduleIngestor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::info;

/// 忙闲网格覆盖的节次范围（正课 1-10, 与课表网格一致）
const GRID_PERIOD_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

// ==========================================
// 分析结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_people: usize,
    /// 学期最大周次（默认 20, 按观测到的周次动态抬升）
    pub max_week: u32,
    /// 去重合并后的人员课表明细
    pub data: Vec<PersonRecord>,
    /// 元数据集合（前端筛选器用）
    pub all_colleges: BTreeSet<String>,
    pub all_majors: BTreeSet<String>,
    pub all_grades: BTreeSet<String>,
    /// 被隔离的失败文件
    pub failures: Vec<FileFailure>,
}

/// 单个时间槽的忙闲汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotUsage {
    pub busy_count: usize,
    pub free_count: usize,
    pub busy_people: Vec<String>,
    pub free_people: Vec<String>,
}

// ==========================================
// 分析 API
// ==========================================
pub struct AnalysisApi;

impl AnalysisApi {
    /// 批量解析课表文件并汇总
    pub async fn analyze(paths: Vec<PathBuf>) -> ApiResult<AnalysisResult> {
        let outcome = ScheduleIngestor::ingest_batch(paths).await?;

        let mut all_colleges = BTreeSet::new();
        let mut all_majors = BTreeSet::new();
        let mut all_grades = BTreeSet::new();
        for person in &outcome.people {
            if let Some(college) = &person.identity.college {
                all_colleges.insert(college.clone());
            }
            if let Some(major) = &person.identity.major {
                all_majors.insert(major.clone());
            }
            if let Some(grade) = &person.identity.grade {
                all_grades.insert(grade.clone());
            }
        }

        info!(
            total_people = outcome.people.len(),
            max_week = outcome.max_week,
            "课表分析完成"
        );

        Ok(AnalysisResult {
            total_people: outcome.people.len(),
            max_week: outcome.max_week,
            data: outcome.people,
            all_colleges,
            all_majors,
            all_grades,
            failures: outcome.failures,
        })
    }

    /// 生成指定周次的忙闲网格
    ///
    /// 键为 "<星期>_<节次>"；每个槽给出忙/闲人数与对应人员名单。
    pub fn free_busy_grid(
        people: &[PersonRecord],
        week: u32,
    ) -> BTreeMap<String, SlotUsage> {
        let index = BusySlotIndex::build(people, week);
        let mut grid = BTreeMap::new();

        for weekday in 1..=7u8 {
            for period in GRID_PERIOD_RANGE {
                let slot = SlotCoordinate::new(weekday, period);
                let mut busy_people = Vec::new();
                let mut free_people = Vec::new();
                for person in people {
                    if index.is_busy(&person.id, slot) {
                        busy_people.push(person.identity.name.clone());
                    } else {
                        free_people.push(person.identity.name.clone());
                    }
                }
                grid.insert(
                    slot.key(),
                    SlotUsage {
                        busy_count: busy_people.len(),
                        free_count: free_people.len(),
                        busy_people,
                        free_people,
                    },
                );
            }
        }

        grid
    }
}
