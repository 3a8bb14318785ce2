// ==========================================
// 课表排班系统 - 连排偏好贪心策略
// ==========================================
// 规则: 需求必须按 (星期, 节次) 升序处理 —— 处理第 p 节时
//       第 p-1 节的结果已经确定, 上一节的当班者获得最高优先级,
//       以鼓励同一人连续值班; 平局回落到负载升序
// ==========================================

use crate::domain::assignment::{Assignee, AssignmentResult, Candidate, DemandRequirement};
use crate::engine::eligibility::{
    eligible_candidates, init_loads, load_of, shortfall_warning,
};
use crate::engine::strategy::AssignmentStrategy;
use std::collections::HashSet;
use tracing::info;

pub struct ConsecutiveStrategy;

impl AssignmentStrategy for ConsecutiveStrategy {
    fn execute(
        &self,
        people: &[Candidate],
        demand: &[DemandRequirement],
        per_person_cap: u32,
    ) -> AssignmentResult {
        info!(
            people = people.len(),
            demand = demand.len(),
            "策略执行开始: 连排优先贪心"
        );

        let mut result = AssignmentResult::default();
        let mut loads = init_loads(people);

        // 时间升序是本策略的前提, 不能按调用方给定顺序处理
        let mut ordered: Vec<DemandRequirement> = demand.to_vec();
        ordered.sort_by_key(|req| req.slot);

        for req in &ordered {
            result.total_demand += req.headcount;

            // 上一节（同一天 period-1）的当班者
            let prev_ids: HashSet<&str> = req
                .slot
                .previous_period()
                .and_then(|prev| result.solution.get(&prev))
                .map(|assignees| assignees.iter().map(|a| a.id.as_str()).collect())
                .unwrap_or_default();

            let mut available = eligible_candidates(people, req.slot, &loads, per_person_cap);

            // 因子1: 是否连班（权重最高）; 因子2: 负载均衡
            available.sort_by_key(|c| {
                let continuous = prev_ids.contains(c.id.as_str());
                (if continuous { 0u8 } else { 1u8 }, load_of(&loads, &c.id))
            });

            let need = req.headcount as usize;
            if available.len() < need {
                result.warnings.push(shortfall_warning(req, available.len()));
            }

            let selected: Vec<Assignee> = available
                .iter()
                .take(need)
                .map(|c| Assignee::from(*c))
                .collect();

            for assignee in &selected {
                *loads.entry(assignee.id.clone()).or_insert(0) += 1;
            }
            result.solution.insert(req.slot, selected);
        }

        info!(total_demand = result.total_demand, "策略执行结束: 连排优先贪心");
        result
    }
}
