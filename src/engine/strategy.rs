// ==========================================
// 课表排班系统 - 排班策略定义
// ==========================================
// 用途:
// - 三种可互换的排班算法共用同一个 execute 入口;
// - 策略名不可识别时报配置错误, 不做静默回退, 避免掩盖拼写错误。
// ==========================================

use crate::domain::assignment::{AssignmentResult, Candidate, DemandRequirement};
use serde::{Deserialize, Serialize};

/// 排班策略接口
///
/// 共同约束：候选人只有在该时间槽空闲且未达周上限时才可被排入；
/// 可用人数不足时排入全部可用者并记录警告，绝不排入不可用者。
pub trait AssignmentStrategy {
    fn execute(
        &self,
        people: &[Candidate],
        demand: &[DemandRequirement],
        per_person_cap: u32,
    ) -> AssignmentResult;
}

/// 排班策略种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// 负载均衡贪心
    LoadBalanced,
    /// 连排偏好贪心
    ContinuityBiased,
    /// 随机多轮方差最小化搜索
    RandomVariance,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::LoadBalanced => "load_balanced",
            StrategyKind::ContinuityBiased => "continuity_biased",
            StrategyKind::RandomVariance => "random_variance",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            StrategyKind::LoadBalanced => "负载均衡",
            StrategyKind::ContinuityBiased => "连排优先",
            StrategyKind::RandomVariance => "全局寻优",
        }
    }
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::LoadBalanced
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "load_balanced" | "load-balanced" => Ok(StrategyKind::LoadBalanced),
            "continuity_biased" | "continuity-biased" => Ok(StrategyKind::ContinuityBiased),
            "random_variance" | "random-variance" => Ok(StrategyKind::RandomVariance),
            other => Err(format!("未知排班策略: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "load_balanced".parse::<StrategyKind>().unwrap(),
            StrategyKind::LoadBalanced
        );
        assert_eq!(
            "Continuity-Biased".parse::<StrategyKind>().unwrap(),
            StrategyKind::ContinuityBiased
        );
    }

    #[test]
    fn test_unknown_strategy_is_error_not_default() {
        let result = "hungarian".parse::<StrategyKind>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("hungarian"));
    }
}
