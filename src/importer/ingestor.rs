// ==========================================
// 课表排班系统 - 课表导入器
// ==========================================
// 职责: 驱动单个工作表完成 身份提取 -> 布局定位 -> 逐格解析,
//       并提供多文件并发批量导入与身份去重合并
// 约束: 单文件失败隔离; 合并顺序与输入文件顺序一致, 保证结果可复现
// ==========================================

use crate::domain::person::{PersonIdentity, PersonRecord, PersonScheduleEntry, UNKNOWN_PERSON};
use crate::domain::types::SlotCoordinate;
use crate::importer::cell_parser::CellParser;
use crate::importer::error::{IngestError, IngestResult};
use crate::importer::layout_locator::TableLayoutLocator;
use crate::importer::sheet_reader::{ExcelSheetReader, SheetGrid};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{error, info};

/// 课表网格固定尺寸：10 节 x 7 天
const GRID_PERIODS: u8 = 10;
const GRID_WEEKDAYS: u8 = 7;

/// 身份字段所在的前部行带（前 5 行内按标签匹配，顺序无关）
const IDENTITY_ROW_BAND: usize = 5;

/// 学期默认周数（解析过程中被观测到的更大周次抬升）
pub const DEFAULT_MAX_WEEK: u32 = 20;

// ==========================================
// 批量导入结果
// ==========================================
/// 单文件失败记录（隔离, 不中断批次）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    pub file: String,
    pub reason: String,
}

/// 一次批量导入的完整产出
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// 按身份去重合并后的人员列表（输入文件顺序稳定）
    pub people: Vec<PersonRecord>,
    /// 被隔离的失败文件
    pub failures: Vec<FileFailure>,
    /// 全局最大周次
    pub max_week: u32,
}

// ==========================================
// 课表导入器
// ==========================================
pub struct ScheduleIngestor;

impl ScheduleIngestor {
    /// 解析一个工作表为一条人员记录
    ///
    /// 找不到"星期一"锚点的工作表只贡献身份信息（entries 为空），不算错误。
    pub fn ingest_sheet(grid: &SheetGrid, file_name_hint: Option<&str>) -> PersonRecord {
        let identity = extract_identity(grid, file_name_hint);
        let mut record = PersonRecord::new(identity);

        let layout = match TableLayoutLocator::locate(grid) {
            Some(layout) => layout,
            None => {
                info!(person = %record.identity.name, "工作表无课表网格，仅保留身份信息");
                return record;
            }
        };

        // 固定 10 行 x 7 列的网格区域
        for period_offset in 0..GRID_PERIODS {
            let row = layout.data_start_row + period_offset as usize;
            for day_offset in 0..GRID_WEEKDAYS {
                let col = layout.anchor_column + day_offset as usize;
                let Some(cell_text) = grid.cell(row, col) else {
                    continue;
                };
                let occurrences = CellParser::parse(cell_text);
                if occurrences.is_empty() {
                    continue;
                }
                record.entries.push(PersonScheduleEntry {
                    slot: SlotCoordinate::new(day_offset + 1, period_offset + 1),
                    occurrences,
                });
            }
        }

        record
    }

    /// 读取并解析单个课表文件
    pub fn ingest_file(path: &PathBuf) -> IngestResult<PersonRecord> {
        let grid = ExcelSheetReader::read_first_sheet(path)?;
        let hint = path.file_name().and_then(|n| n.to_str());
        Ok(Self::ingest_sheet(&grid, hint))
    }

    /// 并发批量导入多个课表文件
    ///
    /// 每个文件的解析相互独立，放入 blocking 线程池并发执行；
    /// join_all 保持输入顺序，合并结果因此可复现。
    pub async fn ingest_batch(paths: Vec<PathBuf>) -> IngestResult<BatchOutcome> {
        use futures::future::join_all;

        if paths.is_empty() {
            return Err(IngestError::EmptyBatch);
        }

        info!(count = paths.len(), "开始批量导入课表文件");
        let total = paths.len();

        let tasks = paths.into_iter().map(|path| {
            let file_label = path.display().to_string();
            async move {
                let handle = tokio::task::spawn_blocking(move || Self::ingest_file(&path));
                match handle.await {
                    Ok(Ok(record)) => {
                        info!(file = %file_label, person = %record.identity.name, "课表文件导入成功");
                        Ok(record)
                    }
                    Ok(Err(e)) => {
                        error!(file = %file_label, error = %e, "课表文件导入失败");
                        Err(FileFailure {
                            file: file_label,
                            reason: e.to_string(),
                        })
                    }
                    Err(e) => {
                        error!(file = %file_label, error = %e, "导入任务异常终止");
                        Err(FileFailure {
                            file: file_label,
                            reason: format!("导入任务异常终止: {}", e),
                        })
                    }
                }
            }
        });

        let results = join_all(tasks).await;

        let mut records = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(record) => records.push(record),
                Err(failure) => failures.push(failure),
            }
        }

        if records.is_empty() {
            return Err(IngestError::AllFilesFailed(total));
        }

        let people = merge_records(records);
        let max_week = people
            .iter()
            .filter_map(PersonRecord::max_week)
            .max()
            .unwrap_or(0)
            .max(DEFAULT_MAX_WEEK);

        info!(
            total,
            success = people.len(),
            failed = failures.len(),
            max_week,
            "批量导入完成"
        );

        Ok(BatchOutcome {
            people,
            failures,
            max_week,
        })
    }
}

// ==========================================
// 身份提取
// ==========================================
/// 从前部行带提取身份字段
///
/// 标签独立匹配（姓名/年级/院系/专业/学号），顺序无关，各字段可缺失。
/// 姓名缺失时回退为文件名（去扩展名），文件名也缺失时用占位符。
fn extract_identity(grid: &SheetGrid, file_name_hint: Option<&str>) -> PersonIdentity {
    let mut identity = PersonIdentity::default();

    for row in grid.rows().iter().take(IDENTITY_ROW_BAND) {
        // 整行拼接后按标签提取，字段可能分散在不同单元格
        let row_text = row.join(" ");
        let normalized = row_text.replace('：', ":");

        if identity.name.is_empty() {
            if let Some(v) = value_after_label(&normalized, "姓名") {
                identity.name = v;
            }
        }
        if identity.grade.is_none() {
            identity.grade = value_after_label(&normalized, "年级");
        }
        if identity.college.is_none() {
            identity.college = value_after_label(&normalized, "院系");
        }
        if identity.major.is_none() {
            identity.major = value_after_label(&normalized, "专业");
        }
        if identity.code.is_none() {
            identity.code = value_after_label(&normalized, "学号");
        }
    }

    if identity.name.is_empty() {
        identity.name = match file_name_hint {
            Some(hint) => strip_extension(hint).to_string(),
            None => UNKNOWN_PERSON.to_string(),
        };
    }

    identity
}

/// 提取 "标签:" 之后的连续非空白文本
fn value_after_label(text: &str, label: &str) -> Option<String> {
    let pattern = format!("{}:", label);
    let idx = text.find(&pattern)?;
    let value: String = text[idx + pattern.len()..]
        .chars()
        .take_while(|c| !c.is_whitespace())
        .collect();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}

// ==========================================
// 身份去重合并
// ==========================================
/// 按 (姓名, 专业, 年级) 合并记录
///
/// 同一人的课表条目追加到首次出现的记录上；输出顺序与输入稳定一致。
pub fn merge_records(records: Vec<PersonRecord>) -> Vec<PersonRecord> {
    let mut merged: Vec<PersonRecord> = Vec::new();
    let mut index_by_key: HashMap<(String, String, String), usize> = HashMap::new();

    for record in records {
        let key = record.identity.dedup_key();
        match index_by_key.get(&key) {
            Some(&idx) => {
                merged[idx].entries.extend(record.entries);
            }
            None => {
                index_by_key.insert(key, merged.len());
                merged.push(record);
            }
        }
    }

    merged
}
