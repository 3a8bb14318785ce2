// ==========================================
// 课表排班系统 - 周次表达式展开
// ==========================================
// 职责: "2-6,8" / "3-9(单)" 形式的周次表达式 -> WeekSet
// 约束: 软失败 —— 单个片段不可解析只记警告并跳过, 不中断整体展开
// ==========================================

use crate::domain::week_set::WeekSet;
use tracing::warn;

pub struct WeekSetExpander;

impl WeekSetExpander {
    /// 展开周次表达式
    ///
    /// 支持：逗号分隔（半角/全角）、连字符范围（含端点）、(单)/(双) 单双周标记。
    ///
    /// 例: "3-5(单),8-10,16-18(双)" -> {3, 5, 8, 9, 10, 16, 18}
    pub fn expand(spec: &str) -> WeekSet {
        let mut weeks = Vec::new();
        if spec.trim().is_empty() {
            return WeekSet::empty();
        }

        for raw_part in spec.split([',', '，']) {
            let part = raw_part.trim();
            if part.is_empty() {
                continue;
            }

            // 检测单双周标记（兼容中英文括号）
            let is_odd = part.contains("(单)") || part.contains("（单）");
            let is_even = part.contains("(双)") || part.contains("（双）");

            // 去掉标记后只剩数字与连字符，"3-5(单)" -> "3-5"
            let clean = strip_parity_marker(part);

            match clean.split_once('-') {
                Some((start_str, end_str)) => {
                    // 范围 "3-5"；start > end 时区间为空，对应片段无贡献
                    let (start, end) = match (leading_int(start_str), leading_int(end_str)) {
                        (Some(s), Some(e)) => (s, e),
                        _ => {
                            warn!(part = %part, spec = %spec, "周次片段解析异常");
                            continue;
                        }
                    };
                    for week in start..=end {
                        if matches_parity(week, is_odd, is_even) {
                            weeks.push(week);
                        }
                    }
                }
                None => {
                    // 单个数字 "8"
                    match leading_int(&clean) {
                        Some(week) => {
                            if matches_parity(week, is_odd, is_even) {
                                weeks.push(week);
                            }
                        }
                        None => {
                            warn!(part = %part, spec = %spec, "周次片段解析异常");
                        }
                    }
                }
            }
        }

        weeks.into_iter().collect()
    }
}

/// 移除 (单)/(双) 标记
fn strip_parity_marker(part: &str) -> String {
    part.replace("(单)", "")
        .replace("（单）", "")
        .replace("(双)", "")
        .replace("（双）", "")
        .trim()
        .to_string()
}

/// 提取片段中的首个整数（容忍数字周围的噪声字符）
fn leading_int(s: &str) -> Option<u32> {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn matches_parity(week: u32, is_odd: bool, is_even: bool) -> bool {
    if is_odd {
        week % 2 != 0
    } else if is_even {
        week % 2 == 0
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_vec(spec: &str) -> Vec<u32> {
        WeekSetExpander::expand(spec).iter().collect()
    }

    #[test]
    fn test_expand_single_and_range() {
        assert_eq!(expand_vec("2-6,8"), vec![2, 3, 4, 5, 6, 8]);
        assert_eq!(expand_vec("8"), vec![8]);
    }

    #[test]
    fn test_expand_full_width_comma() {
        assert_eq!(expand_vec("1，3"), vec![1, 3]);
    }

    #[test]
    fn test_expand_odd_even_markers() {
        assert_eq!(expand_vec("3-9(单)"), vec![3, 5, 7, 9]);
        assert_eq!(expand_vec("3-9(双)"), vec![4, 6, 8]);
        assert_eq!(expand_vec("3-9（单）"), vec![3, 5, 7, 9]);
    }

    #[test]
    fn test_expand_mixed_spec() {
        assert_eq!(
            expand_vec("3-5(单),8-10,16-18(双)"),
            vec![3, 5, 8, 9, 10, 16, 18]
        );
    }

    #[test]
    fn test_expand_reversed_range_is_empty_contribution() {
        assert!(expand_vec("9-3").is_empty());
        // 其他片段不受影响
        assert_eq!(expand_vec("9-3,5"), vec![5]);
    }

    #[test]
    fn test_expand_empty_input() {
        assert!(expand_vec("").is_empty());
        assert!(expand_vec("   ").is_empty());
    }

    #[test]
    fn test_expand_skips_unparseable_token() {
        assert_eq!(expand_vec("abc,4"), vec![4]);
    }

    #[test]
    fn test_expand_tolerates_noise_around_digits() {
        // 仅提取前导整数
        assert_eq!(expand_vec("第3周"), vec![3]);
    }
}
