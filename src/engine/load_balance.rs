// ==========================================
// 课表排班系统 - 负载均衡贪心策略
// ==========================================
// 规则: 需求按 (星期, 节次) 固定顺序处理;
//       候选人按当前负载升序录取, 同负载者按预洗牌的随机顺序打破平局
// ==========================================

use crate::domain::assignment::{Assignee, AssignmentResult, Candidate, DemandRequirement};
use crate::engine::eligibility::{
    eligible_candidates, init_loads, load_of, shortfall_warning,
};
use crate::engine::strategy::AssignmentStrategy;
use rand::seq::SliceRandom;
use tracing::info;

pub struct LoadBalanceStrategy;

impl AssignmentStrategy for LoadBalanceStrategy {
    fn execute(
        &self,
        people: &[Candidate],
        demand: &[DemandRequirement],
        per_person_cap: u32,
    ) -> AssignmentResult {
        info!(
            people = people.len(),
            demand = demand.len(),
            "策略执行开始: 负载均衡贪心"
        );

        let mut result = AssignmentResult::default();
        let mut loads = init_loads(people);
        let mut rng = rand::rng();

        // 固定时间顺序处理需求
        let mut ordered: Vec<DemandRequirement> = demand.to_vec();
        ordered.sort_by_key(|req| req.slot);

        for req in &ordered {
            result.total_demand += req.headcount;

            let mut available = eligible_candidates(people, req.slot, &loads, per_person_cap);

            // 先洗牌解决同负载的平局公平性，再按负载稳定排序
            available.shuffle(&mut rng);
            available.sort_by_key(|c| load_of(&loads, &c.id));

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

        info!(total_demand = result.total_demand, "策略执行结束: 负载均衡贪心");
        result
    }
}
