// ==========================================
// 课表排班系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供上层请求插件调用
// ==========================================

pub mod analysis_api;
pub mod error;
pub mod scheduler_api;

// 重导出核心类型
pub use analysis_api::{AnalysisApi, AnalysisResult, SlotUsage};
pub use error::{ApiError, ApiResult};
pub use scheduler_api::{
    AutoScheduleRequest, CandidateDto, RequirementDto, ScheduleItemDto, SchedulerApi,
    SchedulerPersonDto, ScheduleResultDto,
};
