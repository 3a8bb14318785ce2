// ==========================================
// 课表排班系统 - 领域类型定义
// ==========================================
// 职责: 时间槽坐标与通用类型
// 约束: SlotCoordinate 按 (weekday, period) 全序, 可作 Map 键
// ==========================================

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 星期上限（周一=1 .. 周日=7）
pub const MAX_WEEKDAY: u8 = 7;

/// 节次上限（0=早自习, 1-10=正课, 11=午休, 12=傍晚, 13=晚间）
pub const MAX_PERIOD: u8 = 13;

// ==========================================
// 时间槽坐标 (Slot Coordinate)
// ==========================================
// 序列化格式: "<weekday>_<period>" 字符串键（与前端约定一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotCoordinate {
    pub weekday: u8,
    pub period: u8,
}

impl SlotCoordinate {
    /// 构造时间槽坐标（调用方保证范围合法，例如课表网格遍历）
    pub fn new(weekday: u8, period: u8) -> Self {
        SlotCoordinate { weekday, period }
    }

    /// 带范围校验的构造
    pub fn try_new(weekday: u8, period: u8) -> Result<Self, String> {
        if !(1..=MAX_WEEKDAY).contains(&weekday) {
            return Err(format!("星期超出范围 [1,{}]: {}", MAX_WEEKDAY, weekday));
        }
        if period > MAX_PERIOD {
            return Err(format!("节次超出范围 [0,{}]: {}", MAX_PERIOD, period));
        }
        Ok(SlotCoordinate { weekday, period })
    }

    /// 字符串键形式 "<weekday>_<period>"
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// 同一天的上一节（用于连排偏好），节次 0 没有上一节
    pub fn previous_period(&self) -> Option<SlotCoordinate> {
        if self.period == 0 {
            return None;
        }
        Some(SlotCoordinate {
            weekday: self.weekday,
            period: self.period - 1,
        })
    }

    /// 节次的展示名称（警告信息用）
    pub fn period_label(&self) -> String {
        match self.period {
            0 => "早自习".to_string(),
            11 => "午休".to_string(),
            12 => "傍晚".to_string(),
            13 => "晚间".to_string(),
            n => format!("第{}节", n),
        }
    }
}

impl fmt::Display for SlotCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.weekday, self.period)
    }
}

impl FromStr for SlotCoordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, period) = s
            .trim()
            .split_once('_')
            .ok_or_else(|| format!("时间槽格式错误（期望 <星期>_<节次>）: {}", s))?;
        let weekday: u8 = day
            .parse()
            .map_err(|_| format!("星期解析失败: {}", day))?;
        let period: u8 = period
            .parse()
            .map_err(|_| format!("节次解析失败: {}", period))?;
        SlotCoordinate::try_new(weekday, period)
    }
}

// 序列化为 "d_p" 字符串，保证可以直接作为 JSON Map 键
impl Serialize for SlotCoordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SlotCoordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_ordering_by_weekday_then_period() {
        let a = SlotCoordinate::new(1, 10);
        let b = SlotCoordinate::new(2, 1);
        let c = SlotCoordinate::new(2, 3);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_slot_key_round_trip() {
        let slot = SlotCoordinate::new(3, 7);
        assert_eq!(slot.key(), "3_7");
        let parsed: SlotCoordinate = "3_7".parse().unwrap();
        assert_eq!(parsed, slot);
    }

    #[test]
    fn test_slot_from_str_rejects_out_of_range() {
        assert!("8_1".parse::<SlotCoordinate>().is_err());
        assert!("1_14".parse::<SlotCoordinate>().is_err());
        assert!("abc".parse::<SlotCoordinate>().is_err());
    }

    #[test]
    fn test_previous_period() {
        assert_eq!(
            SlotCoordinate::new(2, 3).previous_period(),
            Some(SlotCoordinate::new(2, 2))
        );
        assert_eq!(SlotCoordinate::new(2, 0).previous_period(), None);
    }

    #[test]
    fn test_period_label() {
        assert_eq!(SlotCoordinate::new(1, 0).period_label(), "早自习");
        assert_eq!(SlotCoordinate::new(1, 11).period_label(), "午休");
        assert_eq!(SlotCoordinate::new(1, 5).period_label(), "第5节");
    }

    #[test]
    fn test_slot_serializes_as_string_key() {
        let slot = SlotCoordinate::new(5, 2);
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"5_2\"");
    }
}
