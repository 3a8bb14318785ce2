// ==========================================
// 排班引擎集成测试
// ==========================================
// 测试目标: 三种策略的公平性、连排偏好、上限与缺口语义
// ==========================================

use std::collections::BTreeSet;
use std::time::Instant;
use timetable_scheduler::engine::{
    AssignmentOptimizer, RandomSearchConfig, StrategyKind,
};
use timetable_scheduler::{Candidate, DemandRequirement, SlotCoordinate};

fn candidate(id: &str, busy: &[SlotCoordinate]) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: format!("同学{}", id),
        busy_slots: busy.iter().copied().collect::<BTreeSet<_>>(),
    }
}

fn demand(day: u8, period: u8, count: u32) -> DemandRequirement {
    DemandRequirement {
        slot: SlotCoordinate::new(day, period),
        headcount: count,
    }
}

// ==========================================
// 负载均衡贪心
// ==========================================

#[test]
fn test_load_balance_fairness_within_one() {
    let people = vec![
        candidate("a", &[]),
        candidate("b", &[]),
        candidate("c", &[]),
        candidate("d", &[]),
    ];
    // 8 个单人班次, 4 名全程空闲的候选人 -> 每人 2 班
    let demand_list: Vec<DemandRequirement> = (1u8..=4)
        .flat_map(|day| vec![demand(day, 1, 1), demand(day, 2, 1)])
        .collect();

    let result = AssignmentOptimizer::new().execute(
        &people,
        &demand_list,
        10,
        StrategyKind::LoadBalanced,
    );

    assert!(result.warnings.is_empty());
    assert_eq!(result.total_demand, 8);
    assert_eq!(result.assigned_count(), 8);

    let loads = result.load_per_person(&people);
    let max = loads.values().max().copied().unwrap();
    let min = loads.values().min().copied().unwrap();
    assert!(max - min <= 1, "负载差超过 1: {:?}", loads);
}

#[test]
fn test_load_balance_respects_cap_with_warnings() {
    let people = vec![candidate("a", &[]), candidate("b", &[])];
    let demand_list = vec![
        demand(1, 1, 1),
        demand(1, 2, 1),
        demand(1, 3, 1),
        demand(1, 4, 1),
    ];

    // 每人最多 1 班 -> 只能排 2 人次, 其余 2 个槽记录缺口
    let result = AssignmentOptimizer::new().execute(
        &people,
        &demand_list,
        1,
        StrategyKind::LoadBalanced,
    );

    assert_eq!(result.assigned_count(), 2);
    assert_eq!(result.warnings.len(), 2);
    for load in result.load_per_person(&people).values() {
        assert!(*load <= 1);
    }
}

#[test]
fn test_busy_person_never_assigned() {
    let slot = SlotCoordinate::new(2, 3);
    let people = vec![candidate("busy", &[slot]), candidate("free", &[])];
    let demand_list = vec![DemandRequirement {
        slot,
        headcount: 2,
    }];

    for strategy in [
        StrategyKind::LoadBalanced,
        StrategyKind::ContinuityBiased,
        StrategyKind::RandomVariance,
    ] {
        let result = AssignmentOptimizer::new().execute(&people, &demand_list, 5, strategy);
        let assigned = result.solution.get(&slot).unwrap();
        // 宁缺毋滥: 不会用忙碌者凑数
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].id, "free");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("人力不足"));
    }
}

// ==========================================
// 连排偏好贪心
// ==========================================

#[test]
fn test_consecutive_prefers_previous_period_worker() {
    let people = vec![candidate("a", &[]), candidate("b", &[])];
    let demand_list = vec![demand(1, 1, 1), demand(1, 2, 1)];

    let result = AssignmentOptimizer::new().execute(
        &people,
        &demand_list,
        5,
        StrategyKind::ContinuityBiased,
    );

    // 第 1 节的当班者在第 2 节优先于负载更低的另一人
    let first = &result.solution.get(&SlotCoordinate::new(1, 1)).unwrap()[0];
    let second = &result.solution.get(&SlotCoordinate::new(1, 2)).unwrap()[0];
    assert_eq!(first.id, second.id);
}

#[test]
fn test_consecutive_skips_busy_previous_worker() {
    let second_slot = SlotCoordinate::new(1, 2);
    // a 第 2 节有课, 连排只能断开
    let people = vec![candidate("a", &[second_slot]), candidate("b", &[])];
    let demand_list = vec![demand(1, 1, 1), demand(1, 2, 1)];

    let result = AssignmentOptimizer::new().execute(
        &people,
        &demand_list,
        5,
        StrategyKind::ContinuityBiased,
    );

    let first = &result.solution.get(&SlotCoordinate::new(1, 1)).unwrap()[0];
    let second = &result.solution.get(&second_slot).unwrap()[0];
    if first.id == "a" {
        assert_eq!(second.id, "b");
    }
    assert_eq!(result.warnings.len(), 0);
}

// ==========================================
// 随机方差最小化搜索
// ==========================================

#[test]
fn test_random_search_reaches_zero_variance() {
    let third_slot = SlotCoordinate::new(1, 3);
    // a 第 3 节有课: 单轮贪心可能把 a 排成 0 班, 搜索应找到 1/1/1 的公平解
    let people = vec![
        candidate("a", &[third_slot]),
        candidate("b", &[]),
        candidate("c", &[]),
    ];
    let demand_list = vec![demand(1, 1, 1), demand(1, 2, 1), demand(1, 3, 1)];

    let result = AssignmentOptimizer::new().execute(
        &people,
        &demand_list,
        10,
        StrategyKind::RandomVariance,
    );

    let loads = result.load_per_person(&people);
    assert!(
        loads.values().all(|&l| l == 1),
        "5000 轮搜索应收敛到零方差: {:?}",
        loads
    );
}

#[test]
fn test_random_search_warns_when_demand_exceeds_capacity() {
    let people = vec![candidate("a", &[]), candidate("b", &[])];
    let demand_list = vec![
        demand(1, 1, 1),
        demand(2, 1, 1),
        demand(3, 1, 1),
        demand(4, 1, 1),
    ];

    // 总需求 4 > 总可排人次 2
    let result = AssignmentOptimizer::new().execute(
        &people,
        &demand_list,
        1,
        StrategyKind::RandomVariance,
    );

    assert!(!result.warnings.is_empty());
    assert_eq!(result.total_demand, 4);
    assert_eq!(result.assigned_count(), 2);
}

#[test]
fn test_random_search_expired_deadline_still_returns_solution() {
    let people = vec![candidate("a", &[]), candidate("b", &[])];
    let demand_list = vec![demand(1, 1, 1), demand(2, 1, 1)];

    let optimizer = AssignmentOptimizer::with_search_config(RandomSearchConfig {
        iterations: 5000,
        deadline: Some(Instant::now()),
    });
    let result = optimizer.execute(&people, &demand_list, 5, StrategyKind::RandomVariance);

    // 截止时间已过: 至少完成一轮, 每个需求槽都有结果
    assert_eq!(result.solution.len(), 2);
    assert_eq!(result.assigned_count(), 2);
}

#[test]
fn test_random_search_single_iteration_is_valid() {
    let people = vec![candidate("a", &[]), candidate("b", &[]), candidate("c", &[])];
    let demand_list = vec![demand(1, 1, 2), demand(1, 2, 2)];

    let optimizer = AssignmentOptimizer::with_search_config(RandomSearchConfig {
        iterations: 1,
        deadline: None,
    });
    let result = optimizer.execute(&people, &demand_list, 2, StrategyKind::RandomVariance);

    assert_eq!(result.total_demand, 4);
    assert_eq!(result.assigned_count(), 4);
    for load in result.load_per_person(&people).values() {
        assert!(*load <= 2);
    }
}
