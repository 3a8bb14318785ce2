// ==========================================
// 课表排班系统 - 排班助手 API
// ==========================================
// 职责: 课表文件 -> 标准化人员 DTO; 排班请求校验与执行
// 约束: 校验失败立即整体报错, 不做部分处理
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::assignment::{Assignee, Candidate, DemandRequirement};
use crate::domain::person::PersonRecord;
use crate::domain::types::SlotCoordinate;
use crate::engine::optimizer::AssignmentOptimizer;
use crate::engine::random_search::RandomSearchConfig;
use crate::engine::strategy::StrategyKind;
use crate::importer::ingestor::ScheduleIngestor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::info;

// ==========================================
// 请求/响应 DTO
// ==========================================

/// 排班候选人（忙碌时间槽以 "<星期>_<节次>" 键表示）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDto {
    pub id: String,
    pub name: String,
    pub busy_slots: Vec<String>,
}

/// 单槽人数需求
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequirementDto {
    pub day: u8,
    pub period: u8,
    pub count: u32,
}

/// 自动排班请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoScheduleRequest {
    /// 策略名: load_balanced / continuity_biased / random_variance
    pub strategy: String,
    /// 每人每周最大班次
    pub max_per_week: u32,
    pub requirements: Vec<RequirementDto>,
    pub students: Vec<CandidateDto>,
}

/// 排班结果（JSON 可直接下发前端）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResultDto {
    /// 键 = "<星期>_<节次>", 值 = 有序人选列表
    pub solution: BTreeMap<String, Vec<Assignee>>,
    pub warnings: Vec<String>,
    pub total_demand: u32,
}

/// 标准化人员课表 DTO（供前端缓存）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerPersonDto {
    pub id: String,
    pub name: String,
    pub grade: Option<String>,
    pub college: Option<String>,
    pub major: Option<String>,
    pub schedule_raw: Vec<ScheduleItemDto>,
}

/// 单条课程项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItemDto {
    pub day: u8,
    pub period: u8,
    pub course_name: String,
    pub location: String,
    pub busy_weeks: Vec<u32>,
}

// ==========================================
// 排班 API
// ==========================================
pub struct SchedulerApi;

impl SchedulerApi {
    /// 批量解析课表文件为标准化 DTO 列表
    pub async fn parse_files(paths: Vec<PathBuf>) -> ApiResult<Vec<SchedulerPersonDto>> {
        let outcome = ScheduleIngestor::ingest_batch(paths).await?;
        Ok(outcome.people.iter().map(person_to_dto).collect())
    }

    /// 执行自动排班
    pub fn generate_schedule(request: &AutoScheduleRequest) -> ApiResult<ScheduleResultDto> {
        Self::generate_schedule_with_config(request, RandomSearchConfig::default())
    }

    /// 执行自动排班（自定义随机搜索参数）
    pub fn generate_schedule_with_config(
        request: &AutoScheduleRequest,
        search_config: RandomSearchConfig,
    ) -> ApiResult<ScheduleResultDto> {
        // 1. 输入校验, 任一失败立即返回
        let strategy: StrategyKind = request
            .strategy
            .parse()
            .map_err(ApiError::InvalidInput)?;

        if request.students.is_empty() {
            return Err(ApiError::InvalidInput("候选人列表为空".to_string()));
        }
        if request.requirements.is_empty() {
            return Err(ApiError::InvalidInput("排班需求列表为空".to_string()));
        }
        if request.max_per_week == 0 {
            return Err(ApiError::InvalidInput(
                "每人每周最大班次必须为正整数".to_string(),
            ));
        }

        let people = convert_candidates(&request.students)?;
        let demand = convert_requirements(&request.requirements)?;

        info!(
            strategy = strategy.as_str(),
            students = people.len(),
            requirements = demand.len(),
            "开始自动排班"
        );

        // 2. 执行算法
        let optimizer = AssignmentOptimizer::with_search_config(search_config);
        let result = optimizer.execute(&people, &demand, request.max_per_week, strategy);

        Ok(ScheduleResultDto {
            solution: result
                .solution
                .into_iter()
                .map(|(slot, assignees)| (slot.key(), assignees))
                .collect(),
            warnings: result.warnings,
            total_demand: result.total_demand,
        })
    }
}

// ==========================================
// DTO 转换
// ==========================================

fn person_to_dto(person: &PersonRecord) -> SchedulerPersonDto {
    let mut items = Vec::new();
    for entry in &person.entries {
        for occurrence in &entry.occurrences {
            items.push(ScheduleItemDto {
                day: entry.slot.weekday,
                period: entry.slot.period,
                course_name: occurrence.name.clone(),
                location: occurrence.location.clone(),
                busy_weeks: occurrence.weeks.iter().collect(),
            });
        }
    }
    SchedulerPersonDto {
        id: person.id.clone(),
        name: person.identity.name.clone(),
        grade: person.identity.grade.clone(),
        college: person.identity.college.clone(),
        major: person.identity.major.clone(),
        schedule_raw: items,
    }
}

fn convert_candidates(students: &[CandidateDto]) -> ApiResult<Vec<Candidate>> {
    students
        .iter()
        .map(|dto| {
            let busy_slots = dto
                .busy_slots
                .iter()
                .map(|key| key.parse::<SlotCoordinate>())
                .collect::<Result<BTreeSet<_>, _>>()
                .map_err(|e| {
                    ApiError::InvalidInput(format!("候选人 {} 忙碌时间槽非法: {}", dto.name, e))
                })?;
            Ok(Candidate {
                id: dto.id.clone(),
                name: dto.name.clone(),
                busy_slots,
            })
        })
        .collect()
}

fn convert_requirements(requirements: &[RequirementDto]) -> ApiResult<Vec<DemandRequirement>> {
    let mut seen = BTreeSet::new();
    let mut demand = Vec::with_capacity(requirements.len());
    for dto in requirements {
        let slot = SlotCoordinate::try_new(dto.day, dto.period).map_err(ApiError::InvalidInput)?;
        // 同一时间槽在一次排班中只允许出现一次
        if !seen.insert(slot) {
            return Err(ApiError::InvalidInput(format!(
                "排班需求重复: {}",
                slot.key()
            )));
        }
        demand.push(DemandRequirement {
            slot,
            headcount: dto.count,
        });
    }
    Ok(demand)
}
