// ==========================================
// 课表排班系统 - 单元格解析器
// ==========================================
// 职责: 课表单元格自由文本 -> 结构化课程详情列表
// 单元格格式约定:
//   第一行 课程名
//   第二行 教师【周次表达式周】(兼容半角方括号)
//   第三行 上课地点
//   多门课之间以 "……"(至少两个省略号) 分隔
// ==========================================

use crate::domain::person::{CourseOccurrence, UNKNOWN_LOCATION};
use crate::domain::week_set::WeekSet;
use crate::importer::week_expander::WeekSetExpander;

/// 空闲标记：单元格包含任一标记即视为无课
const FREE_MARKERS: [&str; 2] = ["无课", "时间段空闲"];

pub struct CellParser;

impl CellParser {
    /// 解析单元格文本，返回零或多门课程
    ///
    /// 空文本、单字符文本、含空闲标记的文本均返回空列表。
    /// 周次解析失败的块不丢弃：保留空 WeekSet，课程名等信息对人工可见。
    pub fn parse(cell_text: &str) -> Vec<CourseOccurrence> {
        let trimmed = cell_text.trim();
        if trimmed.chars().count() <= 1 {
            return Vec::new();
        }
        if FREE_MARKERS.iter().any(|m| trimmed.contains(m)) {
            return Vec::new();
        }

        split_course_blocks(trimmed)
            .iter()
            .filter_map(|block| parse_block(block))
            .collect()
    }
}

/// 按至少两个连续省略号切割多门课
fn split_course_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut run = 0usize;

    for ch in text.chars() {
        if ch == '…' {
            run += 1;
            continue;
        }
        if run > 0 {
            if run >= 2 {
                blocks.push(std::mem::take(&mut current));
            } else {
                // 单个省略号不是分隔符，原样保留
                current.push('…');
            }
            run = 0;
        }
        current.push(ch);
    }
    if run == 1 {
        current.push('…');
    } else if run >= 2 {
        // 文本以分隔符结尾
        blocks.push(std::mem::take(&mut current));
        blocks.push(String::new());
        return blocks;
    }
    blocks.push(current);
    blocks
}

/// 解析一个课程块（三行结构）
fn parse_block(block: &str) -> Option<CourseOccurrence> {
    let lines: Vec<&str> = block
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    // 完全不可解析的块直接丢弃，不保留空名课程
    let name = lines.first()?.to_string();

    let mut instructor = None;
    let mut weeks = WeekSet::empty();
    let mut raw_week_label = String::new();

    if let Some(line2) = lines.get(1) {
        match split_instructor_weeks(line2) {
            Some((instructor_part, week_raw)) => {
                if !instructor_part.is_empty() {
                    instructor = Some(instructor_part);
                }
                // 展示文本统一带"周"后缀，避免出现"周周"
                raw_week_label = if week_raw.ends_with('周') {
                    week_raw.clone()
                } else {
                    format!("{}周", week_raw)
                };
                weeks = WeekSetExpander::expand(&week_raw.replace('周', ""));
            }
            None => {
                // 格式不匹配兜底：整行视为教师文本，周次留空
                instructor = Some(line2.to_string());
            }
        }
    }

    // 第三行（超过三行时取最后一行）为地点
    let location = if lines.len() >= 3 {
        if lines.len() > 3 {
            lines[lines.len() - 1].to_string()
        } else {
            lines[2].to_string()
        }
    } else {
        UNKNOWN_LOCATION.to_string()
    };

    Some(CourseOccurrence {
        name,
        instructor,
        location,
        weeks,
        raw_week_label,
    })
}

/// 匹配 "教师【周次】" 形式（兼容半角方括号），返回 (教师, 周次原文)
fn split_instructor_weeks(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    let last = trimmed.chars().last()?;
    if last != '】' && last != ']' {
        return None;
    }
    let open_idx = trimmed.find(['【', '['])?;
    let open_len = trimmed[open_idx..].chars().next()?.len_utf8();
    let close_len = last.len_utf8();
    let inner = trimmed[open_idx + open_len..trimmed.len() - close_len].trim();
    let instructor = trimmed[..open_idx].trim();
    Some((instructor.to_string(), inner.to_string()))
}
