// ==========================================
// 库存需求投影看板 - 投影 API
// ==========================================
// 职责: 面向展示层的字符串接口,解析输入后委托 ProductStore
// 红线: 非数字的编辑输入在此拒绝,不进入会话
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::app::store::{ProductStore, SessionPhase};
use crate::config::ProjectionConfig;
use crate::domain::calendar::{format_calendar_date, parse_calendar_date};
use crate::domain::summary::ColorSummary;
use crate::domain::types::CellColor;
use crate::engine::classifier::classify_record;
use crate::engine::mutator::EditOutcome;
use crate::i18n;
use crate::importer::{parse_product_data_strict, ImportReport};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 内置演示数据集
const DEMO_DATA: &str = include_str!("../../data/demo_projection.json");

// ==========================================
// 视图模型
// ==========================================

/// 汇总条目（单个颜色）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub color: CellColor,
    pub label: String,
    pub count: usize,
    pub percentage: u32,
}

/// 汇总视图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryView {
    pub title: String,
    /// "全部日期" 或 YYYY-MM-DD
    pub scope: String,
    pub total: usize,
    pub entries: Vec<SummaryEntry>,
}

/// 网格单元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub make_to_order: f64,
    pub net_flow: f64,
    pub total: f64,
    pub color: CellColor,
}

/// 网格行（一个产品）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub center_code: String,
    pub reference: String,
    /// 与 GridView.dates 一一对应,无记录的日期为 None
    pub cells: Vec<Option<GridCell>>,
}

/// 网格视图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridView {
    pub dates: Vec<String>,
    pub rows: Vec<GridRow>,
}

/// 会话快照（展示层一次性拉取）
#[derive(Debug, Clone, Serialize)]
struct SessionSnapshot<'a> {
    phase: SessionPhase,
    selected_date: Option<String>,
    summary: &'a ColorSummary,
    grid: GridView,
}

// ==========================================
// 输入解析
// ==========================================

/// 解析编辑框中的数值文本
///
/// 空白、非数字、NaN、无穷大均视为无效输入
pub fn parse_edit_value(raw: &str) -> ApiResult<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ApiError::InvalidInput(format!(
            "编辑值必须为有限数字: '{}'",
            raw
        ))),
    }
}

fn parse_date_arg(raw: &str) -> ApiResult<NaiveDate> {
    parse_calendar_date(raw.trim())
        .ok_or_else(|| ApiError::InvalidInput(format!("日期格式应为 YYYY-MM-DD: '{}'", raw)))
}

// ==========================================
// ProjectionApi
// ==========================================

pub struct ProjectionApi {
    store: ProductStore,
    locale: String,
}

impl ProjectionApi {
    pub fn new(config: ProjectionConfig) -> Self {
        let locale = config.locale.clone();
        Self {
            store: ProductStore::new(config),
            locale,
        }
    }

    /// 使用现成的 store（测试或自定义发布者）
    pub fn with_store(store: ProductStore, locale: impl Into<String>) -> Self {
        Self {
            store,
            locale: locale.into(),
        }
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    // ==========================================
    // 数据加载
    // ==========================================

    /// 加载 JSON 数据源（格式错误退化为空数据集）
    pub fn load_json(&mut self, json_data: &str) -> ImportReport {
        self.store.load_from_json(json_data)
    }

    /// 加载内置演示数据
    pub fn load_demo_data(&mut self) -> ImportReport {
        self.store.load_from_json(DEMO_DATA)
    }

    /// 严格校验数据源,返回可解析的记录数
    pub fn validate_json(&self, json_data: &str) -> ApiResult<usize> {
        let records = parse_product_data_strict(json_data)?;
        Ok(records.len())
    }

    // ==========================================
    // 编辑
    // ==========================================

    /// 编辑框提交
    ///
    /// # 返回
    /// - Ok(true): 值已写入
    /// - Ok(false): 单元格不存在或值未变化
    /// - Err(InvalidInput): 非数字输入,原值保留
    #[instrument(skip(self, raw_value))]
    pub fn edit_cell_input(
        &mut self,
        reference: &str,
        date_str: &str,
        raw_value: &str,
    ) -> ApiResult<bool> {
        let value = parse_edit_value(raw_value)?;
        let date = parse_date_arg(date_str)?;

        let current = self
            .store
            .index()
            .get(date, reference)
            .map(|r| r.make_to_order);
        match current {
            None => {
                tracing::debug!("单元格不存在，忽略编辑");
                Ok(false)
            }
            Some(previous) if previous == value => Ok(false),
            Some(_) => Ok(self.store.edit_cell(reference, date, value, None).is_applied()),
        }
    }

    /// 按数值编辑（delta 仅在 CASCADING_DELTA 模式下生效）
    pub fn edit_cell(
        &mut self,
        reference: &str,
        date_str: &str,
        new_value: f64,
        delta: Option<f64>,
    ) -> ApiResult<EditOutcome> {
        if !new_value.is_finite() {
            return Err(ApiError::InvalidInput(format!("编辑值必须为有限数字: {}", new_value)));
        }
        if let Some(d) = delta {
            if !d.is_finite() {
                return Err(ApiError::InvalidInput(format!("增量必须为有限数字: {}", d)));
            }
        }
        let date = parse_date_arg(date_str)?;
        Ok(self.store.edit_cell(reference, date, new_value, delta))
    }

    // ==========================================
    // 统计范围
    // ==========================================

    pub fn select_date(&mut self, date_str: &str) -> ApiResult<bool> {
        let date = parse_date_arg(date_str)?;
        Ok(self.store.select_date(date))
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    pub fn reset(&mut self) {
        self.store.reset();
    }

    /// 重算汇总（大数据量时交给 worker）
    pub async fn summarize_offloaded(&mut self) -> ApiResult<ColorSummary> {
        Ok(self.store.summarize_offloaded().await?)
    }

    // ==========================================
    // 视图
    // ==========================================

    pub fn summary(&self) -> SummaryView {
        let summary = self.store.color_summary();
        let scope = match self.store.selected_date() {
            Some(date) => format_calendar_date(date),
            None => i18n::t_in("summary.scope_all", &self.locale),
        };

        let entries = CellColor::DISPLAY_ORDER
            .iter()
            .map(|&color| SummaryEntry {
                color,
                label: i18n::color_label(color, &self.locale),
                count: summary.count(color),
                percentage: summary.percentage(color),
            })
            .collect();

        SummaryView {
            title: i18n::t_in("summary.title", &self.locale),
            scope,
            total: summary.total,
            entries,
        }
    }

    pub fn grid(&self) -> GridView {
        let index = self.store.index();
        let dates = self.store.dates();

        let rows = self
            .store
            .references()
            .iter()
            .map(|reference| GridRow {
                center_code: index.center_code_for(reference).unwrap_or_default().to_string(),
                reference: reference.clone(),
                cells: dates
                    .iter()
                    .map(|&date| {
                        index.get(date, reference).map(|r| GridCell {
                            make_to_order: r.make_to_order,
                            net_flow: r.net_flow,
                            total: r.total(),
                            color: classify_record(r),
                        })
                    })
                    .collect(),
            })
            .collect();

        GridView {
            dates: dates.iter().map(|d| format_calendar_date(*d)).collect(),
            rows,
        }
    }

    /// 会话快照 JSON
    pub fn snapshot_json(&self) -> ApiResult<String> {
        let snapshot = SessionSnapshot {
            phase: self.store.phase(),
            selected_date: self.store.selected_date().map(format_calendar_date),
            summary: self.store.color_summary(),
            grid: self.grid(),
        };
        Ok(serde_json::to_string(&snapshot)?)
    }
}

impl Default for ProjectionApi {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}
