// ==========================================
// 课表排班系统 - 引擎层
// ==========================================
// 职责: 排班算法实现
// 约束: 所有策略共用同一接口与可用性规则, 调用点不感知具体算法
// ==========================================

pub mod consecutive;
pub mod eligibility;
pub mod load_balance;
pub mod optimizer;
pub mod random_search;
pub mod strategy;

// 重导出核心类型
pub use consecutive::ConsecutiveStrategy;
pub use load_balance::LoadBalanceStrategy;
pub use optimizer::AssignmentOptimizer;
pub use random_search::{RandomSearchConfig, RandomSearchStrategy};
pub use strategy::{AssignmentStrategy, StrategyKind};
