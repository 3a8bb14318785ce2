// ==========================================
// 课表排班系统 - 周次集合
// ==========================================
// 职责: 承载一门课程实际上课的周次集合
// 约束: 周次唯一且升序; 空集合合法(表示无上课记录)
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 周次集合
///
/// 由周次表达式展开得到（例如 "2-6,8" -> {2,3,4,5,6,8}）。
/// 构建完成后不再修改。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSet(BTreeSet<u32>);

impl WeekSet {
    /// 空周次集合
    pub fn empty() -> Self {
        WeekSet(BTreeSet::new())
    }

    pub fn contains(&self, week: u32) -> bool {
        self.0.contains(&week)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 最大周次（用于动态更新全局学期周数）
    pub fn max(&self) -> Option<u32> {
        self.0.iter().next_back().copied()
    }

    /// 升序遍历
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for WeekSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        WeekSet(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_set_dedup_and_order() {
        let ws: WeekSet = vec![8, 3, 3, 5].into_iter().collect();
        assert_eq!(ws.len(), 3);
        assert_eq!(ws.iter().collect::<Vec<_>>(), vec![3, 5, 8]);
        assert_eq!(ws.max(), Some(8));
    }

    #[test]
    fn test_empty_week_set_is_valid() {
        let ws = WeekSet::empty();
        assert!(ws.is_empty());
        assert!(!ws.contains(1));
        assert_eq!(ws.max(), None);
    }

    #[test]
    fn test_week_set_serializes_as_array() {
        let ws: WeekSet = vec![2, 4].into_iter().collect();
        let json = serde_json::to_string(&ws).unwrap();
        assert_eq!(json, "[2,4]");
    }
}
