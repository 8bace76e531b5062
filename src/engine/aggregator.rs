// ==========================================
// 库存需求投影看板 - 颜色汇总计算
// ==========================================
// 输入: 记录列表 + 可选的统计日期
// 输出: ColorSummary
// 红线: total == 统计范围内的记录数;空范围返回全零
// ==========================================

use crate::domain::product::ProductRecord;
use crate::domain::summary::ColorSummary;
use crate::engine::classifier::classify_record;
use chrono::NaiveDate;
use tracing::instrument;

/// 计算颜色汇总
///
/// # 参数
/// - `records`: 记录列表
/// - `scope_date`: Some(date) 只统计该日历日期;None 统计全部
#[instrument(skip(records), fields(count = records.len()))]
pub fn summarize(records: &[ProductRecord], scope_date: Option<NaiveDate>) -> ColorSummary {
    match scope_date {
        Some(date) => ColorSummary::from_colors(
            records
                .iter()
                .filter(|r| r.forecast_date() == Some(date))
                .map(classify_record),
        ),
        None => summarize_all(records),
    }
}

/// 统计全部记录（不做日期过滤）
pub fn summarize_all(records: &[ProductRecord]) -> ColorSummary {
    ColorSummary::from_colors(records.iter().map(classify_record))
}

/// 统计范围内的记录数
pub fn scope_size(records: &[ProductRecord], scope_date: Option<NaiveDate>) -> usize {
    match scope_date {
        Some(date) => records
            .iter()
            .filter(|r| r.forecast_date() == Some(date))
            .count(),
        None => records.len(),
    }
}
