// ==========================================
// 库存需求投影看板 - 会话状态持有者
// ==========================================
// 职责: 独占持有会话数据（记录、索引、汇总、选中日期、worker 句柄）
// 会话阶段:
//   Empty         未加载数据
//   Loaded        已加载,汇总覆盖全部日期
//   LoadedScoped  已加载,汇总只覆盖选中日期
// 红线: 汇总为派生数据,每次加载/编辑/切换日期后整体重算
// 红线: 编辑不改变选中日期
// ==========================================

use crate::config::ProjectionConfig;
use crate::domain::product::ProductRecord;
use crate::domain::summary::ColorSummary;
use crate::engine::aggregator::{scope_size, summarize};
use crate::engine::events::{
    NoOpEventPublisher, ProjectionEvent, ProjectionEventPublisher, ProjectionEventType,
};
use crate::engine::indexer::ProjectionIndex;
use crate::engine::mutator::{apply_edit, EditMode, EditOutcome};
use crate::engine::worker::{CalculationService, CalculationWorker, WorkerError};
use crate::importer::{ImportReport, JsonProductImporter, ProductImporter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Empty,
    Loaded,
    LoadedScoped,
}

// ==========================================
// ProductStore - 会话状态持有者
// ==========================================
pub struct ProductStore {
    config: ProjectionConfig,
    importer: JsonProductImporter,

    // ===== 会话数据 =====
    products: Vec<ProductRecord>,
    index: ProjectionIndex,
    dates: Vec<NaiveDate>,
    references: Vec<String>,

    // ===== 派生数据 =====
    color_summary: ColorSummary,
    selected_date: Option<NaiveDate>,

    publisher: Arc<dyn ProjectionEventPublisher>,

    // 首次使用时创建,随 store 销毁或会话重置释放
    worker: Option<CalculationWorker>,
}

impl ProductStore {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            config,
            importer: JsonProductImporter::new(),
            products: Vec::new(),
            index: ProjectionIndex::new(),
            dates: Vec::new(),
            references: Vec::new(),
            color_summary: ColorSummary::empty(),
            selected_date: None,
            publisher: Arc::new(NoOpEventPublisher),
            worker: None,
        }
    }

    /// 设置事件发布者
    pub fn with_publisher(mut self, publisher: Arc<dyn ProjectionEventPublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    // ==========================================
    // 状态迁移
    // ==========================================

    /// 从 JSON 文本加载数据（替换当前会话）
    ///
    /// - 空白文本等同于 reset()
    /// - 文档错误退化为空数据集
    /// - 有数据时按配置选中第一个日期
    #[instrument(skip(self, json_data), fields(bytes = json_data.len()))]
    pub fn load_from_json(&mut self, json_data: &str) -> ImportReport {
        if json_data.trim().is_empty() {
            self.reset();
            return ImportReport::default();
        }

        let mut report = self.importer.import_json(json_data);
        let records = std::mem::take(&mut report.records);
        self.load_records(&records);
        report.records = records;
        report
    }

    /// 加载已解析的记录（替换当前会话）
    pub fn load_records(&mut self, records: &[ProductRecord]) {
        self.index = ProjectionIndex::build(records);
        self.products = self.index.flatten();
        self.dates = self.index.dates();
        self.references = self.index.references();
        self.selected_date = if self.config.select_first_date_on_load {
            self.dates.first().copied()
        } else {
            None
        };
        self.refresh_summary();

        tracing::info!(
            records = self.products.len(),
            dates = self.dates.len(),
            references = self.references.len(),
            selected_date = ?self.selected_date,
            "会话数据已加载"
        );

        self.publish(ProjectionEvent::new(
            ProjectionEventType::DataLoaded,
            self.selected_date,
            self.products.len(),
        ));
    }

    /// 编辑单元格的按单生产量
    ///
    /// # 参数
    /// - `delta`: 仅 CASCADING_DELTA 模式使用;None 时取 new_value - 旧值
    ///
    /// # 返回
    /// - EditOutcome::NotFound: (产品, 日期) 不存在,会话不变
    pub fn edit_cell(
        &mut self,
        reference: &str,
        date: NaiveDate,
        new_value: f64,
        delta: Option<f64>,
    ) -> EditOutcome {
        let outcome = apply_edit(
            &mut self.index,
            reference,
            date,
            new_value,
            delta,
            self.config.edit_mode,
        );

        if outcome.is_applied() {
            self.products = self.index.flatten();
            self.refresh_summary();
            self.publish(
                ProjectionEvent::new(
                    ProjectionEventType::CellEdited,
                    self.selected_date,
                    self.products.len(),
                )
                .with_reference(reference),
            );
        }

        outcome
    }

    /// 选中统计日期
    ///
    /// # 返回
    /// - `false`: 会话为空,忽略
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if self.phase() == SessionPhase::Empty {
            tracing::debug!(%date, "会话为空，忽略日期选择");
            return false;
        }

        self.selected_date = Some(date);
        self.refresh_summary();
        tracing::debug!(%date, total = self.color_summary.total, "统计日期已切换");
        self.publish(ProjectionEvent::new(
            ProjectionEventType::ScopeChanged,
            self.selected_date,
            self.products.len(),
        ));
        true
    }

    /// 取消日期选择（汇总覆盖全部日期）
    pub fn clear_selection(&mut self) {
        if self.selected_date.take().is_none() {
            return;
        }

        self.refresh_summary();
        self.publish(ProjectionEvent::new(
            ProjectionEventType::ScopeChanged,
            None,
            self.products.len(),
        ));
    }

    /// 重置会话
    pub fn reset(&mut self) {
        self.products.clear();
        self.index = ProjectionIndex::new();
        self.dates.clear();
        self.references.clear();
        self.selected_date = None;
        self.color_summary = ColorSummary::empty();

        if let Some(worker) = self.worker.take() {
            worker.shutdown();
        }

        tracing::info!("会话已重置");
        self.publish(ProjectionEvent::new(ProjectionEventType::SessionReset, None, 0));
    }

    // ==========================================
    // 可观察状态
    // ==========================================

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn index(&self) -> &ProjectionIndex {
        &self.index
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }

    pub fn color_summary(&self) -> &ColorSummary {
        &self.color_summary
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn edit_mode(&self) -> EditMode {
        self.config.edit_mode
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        if self.products.is_empty() {
            SessionPhase::Empty
        } else if self.selected_date.is_some() {
            SessionPhase::LoadedScoped
        } else {
            SessionPhase::Loaded
        }
    }

    pub fn has_worker(&self) -> bool {
        self.worker.is_some()
    }

    // ==========================================
    // worker 卸载计算
    // ==========================================

    /// 重算当前范围的汇总;记录数达到阈值时交给 worker
    ///
    /// 结果与同步计算一致,写回 color_summary
    pub async fn summarize_offloaded(&mut self) -> Result<ColorSummary, WorkerError> {
        let scope = self.selected_date;
        let size = scope_size(&self.products, scope);

        if !self.config.worker_enabled || size < self.config.offload_min_records {
            self.refresh_summary();
            return Ok(self.color_summary);
        }

        let records: Vec<ProductRecord> = match scope {
            Some(date) => self
                .products
                .iter()
                .filter(|r| r.forecast_date() == Some(date))
                .cloned()
                .collect(),
            None => self.products.clone(),
        };

        tracing::debug!(records = records.len(), "汇总计算交给 worker");
        let summary = {
            let worker = self.ensure_worker()?;
            worker.summarize(records).await?
        };

        self.color_summary = summary;
        Ok(summary)
    }

    fn ensure_worker(&mut self) -> Result<&CalculationWorker, WorkerError> {
        if self.worker.as_ref().map_or(true, |w| !w.is_alive()) {
            self.worker = Some(CalculationWorker::spawn(self.config.worker_queue_capacity)?);
        }
        self.worker
            .as_ref()
            .ok_or_else(|| WorkerError::Unavailable("worker 未初始化".to_string()))
    }

    // ==========================================
    // 内部方法
    // ==========================================

    fn refresh_summary(&mut self) {
        self.color_summary = summarize(&self.products, self.selected_date);
    }

    fn publish(&self, event: ProjectionEvent) {
        let event_type = event.event_type;
        if let Err(e) = self.publisher.publish(event) {
            tracing::warn!(event_type = event_type.as_str(), error = %e, "会话事件发布失败");
        }
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"Datos": [
        {"CenterCode": "AKL", "Reference": "A", "VisibleForecastedDate": "2025-03-20T00:00:00",
         "NetFlow": 200, "GreenZone": 20, "YellowZone": 20, "RedZone": 30, "MakeToOrder": 0},
        {"CenterCode": "AKL", "Reference": "A", "VisibleForecastedDate": "2025-03-21T00:00:00",
         "NetFlow": 10, "GreenZone": 20, "YellowZone": 20, "RedZone": 30, "MakeToOrder": 0},
        {"CenterCode": "BCV", "Reference": "B", "VisibleForecastedDate": "2025-03-21T00:00:00",
         "NetFlow": 0, "GreenZone": 20, "YellowZone": 20, "RedZone": 30, "MakeToOrder": 0}
    ]}"#;

    fn ymd(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_load_selects_first_date() {
        let mut store = ProductStore::default();
        store.load_from_json(SAMPLE);

        assert_eq!(store.phase(), SessionPhase::LoadedScoped);
        assert_eq!(store.selected_date(), Some(ymd(20)));
        assert_eq!(store.dates(), &[ymd(20), ymd(21)]);
        assert_eq!(store.references(), &["A".to_string(), "B".to_string()]);
        assert_eq!(store.color_summary().total, 1);
        assert_eq!(store.color_summary().blue, 1);
    }

    #[test]
    fn test_load_without_preselect() {
        let config = ProjectionConfig {
            select_first_date_on_load: false,
            ..ProjectionConfig::default()
        };
        let mut store = ProductStore::new(config);
        store.load_from_json(SAMPLE);

        assert_eq!(store.phase(), SessionPhase::Loaded);
        assert_eq!(store.color_summary().total, 3);
    }

    #[test]
    fn test_edit_keeps_scope() {
        let mut store = ProductStore::default();
        store.load_from_json(SAMPLE);
        store.select_date(ymd(21));
        assert_eq!(store.color_summary().red, 1);
        assert_eq!(store.color_summary().black, 1);

        // B: 0 + 45 → 黄区
        let outcome = store.edit_cell("B", ymd(21), 45.0, None);
        assert!(outcome.is_applied());
        assert_eq!(store.selected_date(), Some(ymd(21)));
        assert_eq!(store.color_summary().black, 0);
        assert_eq!(store.color_summary().yellow, 1);
        assert!(store.color_summary().is_consistent());
    }

    #[test]
    fn test_clear_selection_is_full_scope() {
        let mut store = ProductStore::default();
        store.load_from_json(SAMPLE);
        store.clear_selection();

        assert_eq!(store.phase(), SessionPhase::Loaded);
        assert_eq!(store.color_summary().total, 3);
    }

    #[test]
    fn test_select_date_on_empty_is_ignored() {
        let mut store = ProductStore::default();
        assert!(!store.select_date(ymd(20)));
        assert_eq!(store.phase(), SessionPhase::Empty);
        assert!(store.selected_date().is_none());
    }

    #[test]
    fn test_blank_load_resets() {
        let mut store = ProductStore::default();
        store.load_from_json(SAMPLE);
        store.load_from_json("");

        assert_eq!(store.phase(), SessionPhase::Empty);
        assert!(store.products().is_empty());
        assert!(store.index().is_empty());
        assert!(store.dates().is_empty());
        assert!(store.references().is_empty());
        assert_eq!(*store.color_summary(), ColorSummary::empty());
        assert!(store.selected_date().is_none());
    }

    #[tokio::test]
    async fn test_offload_creates_worker_lazily() {
        let config = ProjectionConfig {
            offload_min_records: 1,
            select_first_date_on_load: false,
            ..ProjectionConfig::default()
        };
        let mut store = ProductStore::new(config);
        store.load_from_json(SAMPLE);
        let inline = *store.color_summary();
        assert!(!store.has_worker());

        let offloaded = store.summarize_offloaded().await.unwrap();
        assert!(store.has_worker());
        assert_eq!(offloaded, inline);

        store.reset();
        assert!(!store.has_worker());
    }
}
