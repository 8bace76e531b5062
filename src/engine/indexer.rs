// ==========================================
// 库存需求投影看板 - 投影索引
// ==========================================
// 结构: 日历日期 → (产品编码 → 记录)
// 红线: 每个 (日期, 产品) 至多一条记录,重复时后写覆盖
// 说明: 加载时整体重建,编辑时原地修补
// ==========================================

use crate::domain::product::ProductRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::instrument;

// ==========================================
// ProjectionIndex - 两级索引
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionIndex {
    by_date: BTreeMap<NaiveDate, BTreeMap<String, ProductRecord>>,
    references: BTreeSet<String>,
}

impl ProjectionIndex {
    /// 空索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 从记录列表构建索引
    ///
    /// 日期按本地时间截取;日期无法解析的记录不入索引
    #[instrument(skip(records), fields(count = records.len()))]
    pub fn build(records: &[ProductRecord]) -> Self {
        let mut index = Self::new();
        let mut skipped = 0usize;

        for record in records {
            if !index.insert(record.clone()) {
                skipped += 1;
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "存在无法解析日期的记录，未写入索引");
        }

        index
    }

    /// 写入单条记录（后写覆盖）
    ///
    /// # 返回
    /// - `true`: 已写入
    /// - `false`: 日期无法解析,未写入
    pub fn insert(&mut self, record: ProductRecord) -> bool {
        let Some(date) = record.forecast_date() else {
            return false;
        };

        self.references.insert(record.reference.clone());
        self.by_date
            .entry(date)
            .or_default()
            .insert(record.reference.clone(), record);
        true
    }

    /// 查询单元格
    pub fn get(&self, date: NaiveDate, reference: &str) -> Option<&ProductRecord> {
        self.by_date.get(&date).and_then(|m| m.get(reference))
    }

    /// 查询单元格（可变）
    pub fn get_mut(&mut self, date: NaiveDate, reference: &str) -> Option<&mut ProductRecord> {
        self.by_date.get_mut(&date).and_then(|m| m.get_mut(reference))
    }

    /// 指定日期的全部记录
    pub fn records_on(&self, date: NaiveDate) -> Option<&BTreeMap<String, ProductRecord>> {
        self.by_date.get(&date)
    }

    /// 排序后的唯一日期列表
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.by_date.keys().copied().collect()
    }

    /// 排序后的唯一产品编码列表
    pub fn references(&self) -> Vec<String> {
        self.references.iter().cloned().collect()
    }

    /// 晚于 `date` 的日期（升序）
    pub fn dates_after(&self, date: NaiveDate) -> Vec<NaiveDate> {
        use std::ops::Bound::{Excluded, Unbounded};
        self.by_date
            .range((Excluded(date), Unbounded))
            .map(|(d, _)| *d)
            .collect()
    }

    /// 产品所属库存中心（按日期顺序取首次出现的值）
    pub fn center_code_for(&self, reference: &str) -> Option<&str> {
        self.by_date
            .values()
            .find_map(|m| m.get(reference))
            .map(|r| r.center_code.as_str())
    }

    /// 展开为记录列表（日期升序,同日按产品编码升序）
    pub fn flatten(&self) -> Vec<ProductRecord> {
        self.by_date
            .values()
            .flat_map(|m| m.values().cloned())
            .collect()
    }

    /// 单元格总数
    pub fn len(&self) -> usize {
        self.by_date.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
