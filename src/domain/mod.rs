// ==========================================
// 课表排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与值类型
// 约束: 不含文件解析逻辑, 不含排班算法逻辑
// ==========================================

pub mod assignment;
pub mod person;
pub mod types;
pub mod week_set;

// 重导出核心类型
pub use assignment::{Assignee, AssignmentResult, Candidate, DemandRequirement};
pub use person::{
    BusySlotIndex, CourseOccurrence, PersonIdentity, PersonRecord, PersonScheduleEntry,
    UNKNOWN_LOCATION, UNKNOWN_PERSON,
};
pub use types::{SlotCoordinate, MAX_PERIOD, MAX_WEEKDAY};
pub use week_set::WeekSet;
