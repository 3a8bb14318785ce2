// ==========================================
// 课表解析与智能排班系统 - 核心库
// ==========================================
// 系统定位: 把半结构化的周课表导出文件解析为规范化的
// 逐人逐槽占用模型, 在此之上做全员忙闲统计与智能排班
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 课表文件解析
pub mod importer;

// 引擎层 - 排班算法
pub mod engine;

// API 层 - 业务接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Assignee, AssignmentResult, BusySlotIndex, Candidate, CourseOccurrence, DemandRequirement,
    PersonIdentity, PersonRecord, PersonScheduleEntry, SlotCoordinate, WeekSet,
};

// 导入层
pub use importer::{
    BatchOutcome, CellParser, FileFailure, IngestError, ScheduleIngestor, TableLayoutLocator,
    WeekSetExpander,
};

// 引擎
pub use engine::{
    AssignmentOptimizer, AssignmentStrategy, RandomSearchConfig, StrategyKind,
};

// API
pub use api::{AnalysisApi, ApiError, SchedulerApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "课表解析与智能排班系统";
