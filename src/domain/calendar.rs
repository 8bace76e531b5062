// ==========================================
// 库存需求投影看板 - 日历日期工具
// ==========================================
// 红线: 按本地时间截取日期,不使用 UTC
// 原因: 午夜附近的时间戳转 UTC 会落到前/后一天
// ==========================================

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// 日历日期的展示/交换格式
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// 无时区时间戳可接受的格式（视为本地时间）
const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// 从预测时间戳推导日历日期
///
/// # 参数
/// - `raw`: VisibleForecastedDate 原始字符串
///
/// # 返回
/// - `Some(NaiveDate)`: 本地日历日期
/// - `None`: 无法解析
///
/// # 规则
/// - 无时区时间戳: 直接视为本地挂钟时间
/// - 带偏移量/`Z`: 先转换到本地时区,再截取日期
/// - 仅日期: 视为该本地日期
pub fn parse_forecast_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    NaiveDate::parse_from_str(s, CALENDAR_DATE_FORMAT).ok()
}

/// 解析 YYYY-MM-DD 日期（表现层传入的选中日期/编辑日期）
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), CALENDAR_DATE_FORMAT).ok()
}

/// 格式化为 YYYY-MM-DD
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_DATE_FORMAT).to_string()
}
