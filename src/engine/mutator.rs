// ==========================================
// 库存需求投影看板 - 单元格编辑
// ==========================================
// 职责: 修改某个 (产品, 日期) 的按单生产量
// 红线: net_flow 不随编辑变化
// 红线: 索引中不存在的 (产品, 日期) 编辑为空操作
// ==========================================
// 编辑模式:
//   DIRECT_SET       只修改被编辑单元格
//   CASCADING_DELTA  被编辑单元格设为新值,同一产品所有更晚日期
//                    累加 delta（积压/盈余结转）
// ==========================================

use crate::engine::indexer::ProjectionIndex;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

// ==========================================
// 编辑模式 (Edit Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditMode {
    #[default]
    DirectSet,      // 直接设值
    CascadingDelta, // 增量结转
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::DirectSet => write!(f, "DIRECT_SET"),
            EditMode::CascadingDelta => write!(f, "CASCADING_DELTA"),
        }
    }
}

impl EditMode {
    /// 从字符串解析（大小写不敏感,未知值返回 None）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DIRECT_SET" => Some(EditMode::DirectSet),
            "CASCADING_DELTA" => Some(EditMode::CascadingDelta),
            _ => None,
        }
    }
}

// ==========================================
// 编辑结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// 已修改
    Applied {
        previous_value: f64,
        /// 被修改的单元格数（含被编辑单元格）
        cells_changed: usize,
    },
    /// 单元格不存在,未修改
    NotFound,
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }
}

/// 应用一次单元格编辑
///
/// # 参数
/// - `index`: 投影索引（原地修改）
/// - `reference`: 产品编码
/// - `date`: 被编辑的日历日期
/// - `new_value`: 新的按单生产量
/// - `delta`: 结转增量;None 时取 new_value - 旧值（仅 CASCADING_DELTA 使用）
/// - `mode`: 编辑模式
#[instrument(skip(index))]
pub fn apply_edit(
    index: &mut ProjectionIndex,
    reference: &str,
    date: NaiveDate,
    new_value: f64,
    delta: Option<f64>,
    mode: EditMode,
) -> EditOutcome {
    let Some(cell) = index.get_mut(date, reference) else {
        tracing::debug!("编辑目标不存在，忽略");
        return EditOutcome::NotFound;
    };

    let previous_value = cell.make_to_order;
    cell.make_to_order = new_value;
    let mut cells_changed = 1;

    if mode == EditMode::CascadingDelta {
        let delta = delta.unwrap_or(new_value - previous_value);
        if delta != 0.0 {
            for later in index.dates_after(date) {
                if let Some(record) = index.get_mut(later, reference) {
                    record.make_to_order += delta;
                    cells_changed += 1;
                }
            }
        }
    }

    tracing::debug!(previous_value, cells_changed, "单元格编辑完成");

    EditOutcome::Applied {
        previous_value,
        cells_changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductRecord;

    fn record(reference: &str, date: &str, make_to_order: f64) -> ProductRecord {
        ProductRecord {
            center_code: "C1".to_string(),
            reference: reference.to_string(),
            visible_forecasted_date: date.to_string(),
            net_flow: 100.0,
            green_zone: 10.0,
            yellow_zone: 10.0,
            red_zone: 10.0,
            make_to_order,
        }
    }

    fn ymd(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn sample_index() -> ProjectionIndex {
        ProjectionIndex::build(&[
            record("A", "2025-03-20T00:00:00", 0.0),
            record("A", "2025-03-21T00:00:00", 1.0),
            record("A", "2025-03-22T00:00:00", 2.0),
            record("B", "2025-03-21T00:00:00", 5.0),
        ])
    }

    #[test]
    fn test_direct_set_touches_only_edited_cell() {
        let mut index = sample_index();
        let outcome = apply_edit(&mut index, "A", ymd(20), 7.0, None, EditMode::DirectSet);

        assert_eq!(
            outcome,
            EditOutcome::Applied {
                previous_value: 0.0,
                cells_changed: 1
            }
        );
        assert_eq!(index.get(ymd(20), "A").unwrap().make_to_order, 7.0);
        assert_eq!(index.get(ymd(21), "A").unwrap().make_to_order, 1.0);
        assert_eq!(index.get(ymd(22), "A").unwrap().make_to_order, 2.0);
        assert_eq!(index.get(ymd(20), "A").unwrap().net_flow, 100.0);
    }

    #[test]
    fn test_cascading_delta_carries_forward() {
        let mut index = sample_index();
        let outcome = apply_edit(&mut index, "A", ymd(20), 4.0, None, EditMode::CascadingDelta);

        assert_eq!(
            outcome,
            EditOutcome::Applied {
                previous_value: 0.0,
                cells_changed: 3
            }
        );
        assert_eq!(index.get(ymd(20), "A").unwrap().make_to_order, 4.0);
        assert_eq!(index.get(ymd(21), "A").unwrap().make_to_order, 5.0);
        assert_eq!(index.get(ymd(22), "A").unwrap().make_to_order, 6.0);
        // 其他产品不受影响
        assert_eq!(index.get(ymd(21), "B").unwrap().make_to_order, 5.0);
    }

    #[test]
    fn test_cascading_with_explicit_delta() {
        let mut index = sample_index();
        apply_edit(&mut index, "A", ymd(21), 10.0, Some(-1.0), EditMode::CascadingDelta);

        assert_eq!(index.get(ymd(20), "A").unwrap().make_to_order, 0.0);
        assert_eq!(index.get(ymd(21), "A").unwrap().make_to_order, 10.0);
        assert_eq!(index.get(ymd(22), "A").unwrap().make_to_order, 1.0);
    }

    #[test]
    fn test_absent_cell_is_noop() {
        let mut index = sample_index();
        let before = index.clone();

        assert_eq!(
            apply_edit(&mut index, "B", ymd(20), 9.0, None, EditMode::CascadingDelta),
            EditOutcome::NotFound
        );
        assert_eq!(
            apply_edit(&mut index, "Z", ymd(21), 9.0, None, EditMode::DirectSet),
            EditOutcome::NotFound
        );
        assert_eq!(index, before);
    }

    #[test]
    fn test_edit_mode_parse() {
        assert_eq!(EditMode::parse("cascading_delta"), Some(EditMode::CascadingDelta));
        assert_eq!(EditMode::parse("DIRECT_SET"), Some(EditMode::DirectSet));
        assert_eq!(EditMode::parse("other"), None);
        assert_eq!(EditMode::default(), EditMode::DirectSet);
    }
}
