// ==========================================
// 课表排班系统 - 随机多轮方差最小化搜索
// ==========================================
// 规则: 固定轮数的随机重启 —— 每轮以随机顺序处理需求,
//       槽内先洗牌再按负载稳定排序("带噪贪心"), 得到一个完整候选解;
//       以全体人员班次数的总体方差为评分, 保留历史最优,
//       方差为 0(绝对公平)时提前结束
// 说明: 不引入整数规划机器, 用大量廉价采样逼近公平解,
//       公平性是软目标而非硬约束
// ==========================================

use crate::domain::assignment::{Assignee, AssignmentResult, Candidate, DemandRequirement};
use crate::engine::eligibility::{
    eligible_candidates, init_loads, load_of, population_variance, shortfall_warning,
};
use crate::engine::strategy::AssignmentStrategy;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

/// 随机搜索参数
///
/// 轮数默认 5000（经验值, 常规规模下 100ms 内完成）,
/// 可按需求规模调整; deadline 在轮与轮之间协作式检查。
#[derive(Debug, Clone, Copy)]
pub struct RandomSearchConfig {
    pub iterations: usize,
    pub deadline: Option<Instant>,
}

impl Default for RandomSearchConfig {
    fn default() -> Self {
        RandomSearchConfig {
            iterations: 5000,
            deadline: None,
        }
    }
}

pub struct RandomSearchStrategy {
    config: RandomSearchConfig,
}

impl RandomSearchStrategy {
    pub fn new(config: RandomSearchConfig) -> Self {
        RandomSearchStrategy { config }
    }
}

impl Default for RandomSearchStrategy {
    fn default() -> Self {
        RandomSearchStrategy::new(RandomSearchConfig::default())
    }
}

impl AssignmentStrategy for RandomSearchStrategy {
    fn execute(
        &self,
        people: &[Candidate],
        demand: &[DemandRequirement],
        per_person_cap: u32,
    ) -> AssignmentResult {
        info!(
            people = people.len(),
            demand = demand.len(),
            iterations = self.config.iterations,
            "策略执行开始: 随机方差最小化搜索"
        );

        let mut rng = rand::rng();
        let mut best: Option<(f64, AssignmentResult)> = None;
        let rounds = self.config.iterations.max(1);

        for round in 0..rounds {
            // 至少执行一轮, 之后轮间检查截止时间
            if round > 0 {
                if let Some(deadline) = self.config.deadline {
                    if Instant::now() >= deadline {
                        debug!(round, "到达截止时间, 返回当前最优解");
                        break;
                    }
                }
            }

            let candidate_solution = noisy_greedy_round(people, demand, per_person_cap, &mut rng);
            let variance = population_variance(&candidate_solution, people);

            let improved = match &best {
                Some((best_variance, _)) => variance < *best_variance,
                None => true,
            };
            if improved {
                let is_perfect = variance == 0.0;
                best = Some((variance, candidate_solution));
                if is_perfect {
                    debug!(round, "达到零方差, 提前结束");
                    break;
                }
            }
        }

        // rounds >= 1, best 必有值
        let (variance, result) = best.unwrap_or_default();
        info!(
            variance,
            total_demand = result.total_demand,
            "策略执行结束: 随机方差最小化搜索"
        );
        result
    }
}

/// 执行一轮随机化分配
///
/// 需求顺序整体洗牌, 防止靠前的时间槽总是优先抢占人力;
/// 槽内先洗牌再按负载稳定排序, 在贪心之上注入随机性加快收敛。
fn noisy_greedy_round<R: Rng>(
    people: &[Candidate],
    demand: &[DemandRequirement],
    per_person_cap: u32,
    rng: &mut R,
) -> AssignmentResult {
    let mut result = AssignmentResult::default();
    let mut loads = init_loads(people);

    let mut shuffled: Vec<DemandRequirement> = demand.to_vec();
    shuffled.shuffle(rng);

    for req in &shuffled {
        result.total_demand += req.headcount;

        let mut available = eligible_candidates(people, req.slot, &loads, per_person_cap);
        available.shuffle(rng);
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

    result
}
