// ==========================================
// 课表排班系统 - 排班公共基础
// ==========================================
// 职责: 三种策略共用的负载计数、可用性筛选、缺口警告与公平性度量
// 约束: 所有中间状态局部于单次排班调用, 无跨调用共享
// ==========================================

use crate::domain::assignment::{AssignmentResult, Candidate, DemandRequirement};
use crate::domain::types::SlotCoordinate;
use std::collections::HashMap;

/// 初始化每人负载计数器
pub(crate) fn init_loads(people: &[Candidate]) -> HashMap<String, u32> {
    people.iter().map(|p| (p.id.clone(), 0)).collect()
}

pub(crate) fn load_of(loads: &HashMap<String, u32>, id: &str) -> u32 {
    loads.get(id).copied().unwrap_or(0)
}

/// 筛选某时间槽的可用候选人
///
/// 规则A: 该时间段不忙; 规则B: 未达到每人周上限。
pub(crate) fn eligible_candidates<'a>(
    people: &'a [Candidate],
    slot: SlotCoordinate,
    loads: &HashMap<String, u32>,
    per_person_cap: u32,
) -> Vec<&'a Candidate> {
    people
        .iter()
        .filter(|p| !p.is_busy(slot) && load_of(loads, &p.id) < per_person_cap)
        .collect()
}

/// 人力缺口警告文案
pub(crate) fn shortfall_warning(req: &DemandRequirement, available: usize) -> String {
    format!(
        "周{}-{} 需求{}人，实排{}人 (可用人力不足)",
        req.slot.weekday,
        req.slot.period_label(),
        req.headcount,
        available
    )
}

/// 排班结果的总体方差（越低越公平）
///
/// 对全体候选人计算，未被排班者按 0 计入。
pub(crate) fn population_variance(result: &AssignmentResult, people: &[Candidate]) -> f64 {
    if people.is_empty() {
        return 0.0;
    }
    let counts = result.load_per_person(people);
    let n = people.len() as f64;
    let mean = counts.values().map(|&c| c as f64).sum::<f64>() / n;
    counts
        .values()
        .map(|&c| {
            let d = c as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}
