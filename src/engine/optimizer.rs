// ==========================================
// 课表排班系统 - 排班优化器入口
// ==========================================
// 职责: 按策略种类分发到具体算法, 承载随机搜索参数
// 约束: 单次调用内部状态自洽, 并发调用之间无共享可变状态
// ==========================================

use crate::domain::assignment::{AssignmentResult, Candidate, DemandRequirement};
use crate::engine::consecutive::ConsecutiveStrategy;
use crate::engine::load_balance::LoadBalanceStrategy;
use crate::engine::random_search::{RandomSearchConfig, RandomSearchStrategy};
use crate::engine::strategy::{AssignmentStrategy, StrategyKind};
use tracing::instrument;

pub struct AssignmentOptimizer {
    search_config: RandomSearchConfig,
}

impl AssignmentOptimizer {
    pub fn new() -> Self {
        AssignmentOptimizer {
            search_config: RandomSearchConfig::default(),
        }
    }

    /// 自定义随机搜索参数（轮数/截止时间）
    pub fn with_search_config(search_config: RandomSearchConfig) -> Self {
        AssignmentOptimizer { search_config }
    }

    /// 执行一次排班
    #[instrument(skip_all, fields(
        strategy = strategy.as_str(),
        people_count = people.len(),
        demand_count = demand.len(),
        per_person_cap = per_person_cap
    ))]
    pub fn execute(
        &self,
        people: &[Candidate],
        demand: &[DemandRequirement],
        per_person_cap: u32,
        strategy: StrategyKind,
    ) -> AssignmentResult {
        let strategy_impl: Box<dyn AssignmentStrategy> = match strategy {
            StrategyKind::LoadBalanced => Box::new(LoadBalanceStrategy),
            StrategyKind::ContinuityBiased => Box::new(ConsecutiveStrategy),
            StrategyKind::RandomVariance => {
                Box::new(RandomSearchStrategy::new(self.search_config))
            }
        };
        strategy_impl.execute(people, demand, per_person_cap)
    }
}

impl Default for AssignmentOptimizer {
    fn default() -> Self {
        AssignmentOptimizer::new()
    }
}
