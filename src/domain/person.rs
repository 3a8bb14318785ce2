// ==========================================
// 课表排班系统 - 人员与课程实体
// ==========================================
// 职责: 课程详情、人员身份、人员课表记录、忙闲索引
// 约束: 身份去重键 = (姓名, 专业, 年级)
// ==========================================

use crate::domain::types::SlotCoordinate;
use crate::domain::week_set::WeekSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// 地点缺失时的兜底文本
pub const UNKNOWN_LOCATION: &str = "未知地点";

/// 姓名完全无法解析时的兜底文本
pub const UNKNOWN_PERSON: &str = "未知同学";

// ==========================================
// 课程详情 (Course Occurrence)
// ==========================================
/// 单元格中解析出的一次课程
///
/// `name` 必非空：整块文本不可解析时该块被直接丢弃，不保留空名占位。
/// 周次解析失败的块仍然保留（空 WeekSet），课程名/教师/地点对人工可见。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOccurrence {
    /// 课程名
    pub name: String,
    /// 教师（第二行不符合【周次】格式时整行作为教师文本）
    pub instructor: Option<String>,
    /// 上课地点（缺失时为"未知地点"）
    pub location: String,
    /// 实际上课周次
    pub weeks: WeekSet,
    /// 周次原始文本（展示用，例如 "2-6,8周"）
    pub raw_week_label: String,
}

// ==========================================
// 人员课表条目 (Person Schedule Entry)
// ==========================================
/// 一个时间槽上的全部课程（同一单元格可含多门课）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonScheduleEntry {
    pub slot: SlotCoordinate,
    pub occurrences: Vec<CourseOccurrence>,
}

// ==========================================
// 人员身份 (Person Identity)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonIdentity {
    /// 姓名（必有值，解析失败时回退为文件名/占位符）
    pub name: String,
    pub grade: Option<String>,
    pub college: Option<String>,
    pub major: Option<String>,
    /// 学号（课表中显式标注时提取）
    pub code: Option<String>,
}

impl PersonIdentity {
    /// 身份去重键：(姓名, 专业, 年级)
    ///
    /// 两条记录三元组相同即视为同一人，其余字段差异忽略。
    pub fn dedup_key(&self) -> (String, String, String) {
        (
            self.name.clone(),
            self.major.clone().unwrap_or_default(),
            self.grade.clone().unwrap_or_default(),
        )
    }
}

// ==========================================
// 人员课表记录 (Person Record)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRecord {
    /// 会话内唯一 ID（前端列表键）
    pub id: String,
    pub identity: PersonIdentity,
    pub entries: Vec<PersonScheduleEntry>,
}

impl PersonRecord {
    pub fn new(identity: PersonIdentity) -> Self {
        PersonRecord {
            id: Uuid::new_v4().simple().to_string(),
            identity,
            entries: Vec::new(),
        }
    }

    /// 指定周次内有课的全部时间槽
    pub fn busy_slots_in_week(&self, week: u32) -> BTreeSet<SlotCoordinate> {
        self.entries
            .iter()
            .filter(|e| e.occurrences.iter().any(|o| o.weeks.contains(week)))
            .map(|e| e.slot)
            .collect()
    }

    /// 全部课表中出现过的最大周次
    pub fn max_week(&self) -> Option<u32> {
        self.entries
            .iter()
            .flat_map(|e| e.occurrences.iter())
            .filter_map(|o| o.weeks.max())
            .max()
    }
}

// ==========================================
// 忙闲索引 (Busy Slot Index)
// ==========================================
/// 只读派生视图：人员 ID -> 指定周次的忙碌时间槽集合
///
/// 按需重建，不做原地更新。
#[derive(Debug, Clone)]
pub struct BusySlotIndex {
    week: u32,
    by_person: BTreeMap<String, BTreeSet<SlotCoordinate>>,
}

impl BusySlotIndex {
    pub fn build(people: &[PersonRecord], week: u32) -> Self {
        let by_person = people
            .iter()
            .map(|p| (p.id.clone(), p.busy_slots_in_week(week)))
            .collect();
        BusySlotIndex { week, by_person }
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn is_busy(&self, person_id: &str, slot: SlotCoordinate) -> bool {
        self.by_person
            .get(person_id)
            .map(|slots| slots.contains(&slot))
            .unwrap_or(false)
    }

    pub fn busy_slots(&self, person_id: &str) -> Option<&BTreeSet<SlotCoordinate>> {
        self.by_person.get(person_id)
    }
}
