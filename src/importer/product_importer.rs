// ==========================================
// 库存需求投影看板 - 投影数据导入器
// ==========================================
// 导入流程:
// 1. JSON 解析（失败 → 空数据集）
// 2. 逐条清洗（TRIM / 区间非负化）
// 3. 丢弃预测日期无法解析的记录
// ==========================================

use crate::domain::product::ProductRecord;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::ImportError;
use crate::importer::json_parser::parse_product_data_strict;
use tracing::instrument;

// ==========================================
// ImportReport - 导入结果
// ==========================================
#[derive(Debug, Default)]
pub struct ImportReport {
    /// 可索引的记录（保持数据源顺序）
    pub records: Vec<ProductRecord>,
    /// 数据源中解析出的记录数
    pub parsed_count: usize,
    /// 因日期无法解析被丢弃的记录
    pub rejected: Vec<ImportError>,
    /// 被修正为 0 的区间字段数
    pub clamped_zone_fields: usize,
    /// 文档级解析错误（存在时 records 为空）
    pub document_error: Option<ImportError>,
}

impl ImportReport {
    pub fn accepted_count(&self) -> usize {
        self.records.len()
    }
}

// ==========================================
// ProductImporter Trait
// ==========================================
// 实现者: JsonProductImporter
pub trait ProductImporter: Send + Sync {
    /// 从 JSON 文本导入;不返回错误,所有问题记录在 ImportReport 中
    fn import_json(&self, json_data: &str) -> ImportReport;
}

pub struct JsonProductImporter {
    cleaner: DataCleaner,
}

impl JsonProductImporter {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner::new(),
        }
    }
}

impl Default for JsonProductImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductImporter for JsonProductImporter {
    #[instrument(skip(self, json_data), fields(bytes = json_data.len()))]
    fn import_json(&self, json_data: &str) -> ImportReport {
        let raw = match parse_product_data_strict(json_data) {
            Ok(records) => records,
            Err(ImportError::EmptyDocument) => {
                return ImportReport {
                    document_error: Some(ImportError::EmptyDocument),
                    ..ImportReport::default()
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "数据文档解析失败，返回空数据集");
                return ImportReport {
                    document_error: Some(e),
                    ..ImportReport::default()
                };
            }
        };

        let mut report = ImportReport {
            parsed_count: raw.len(),
            ..ImportReport::default()
        };

        for (row, record) in raw.into_iter().enumerate() {
            match self.cleaner.clean_record(row, record) {
                Ok((cleaned, clamped)) => {
                    report.clamped_zone_fields += clamped;
                    report.records.push(cleaned);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "记录被丢弃");
                    report.rejected.push(e);
                }
            }
        }

        if report.clamped_zone_fields > 0 {
            tracing::warn!(
                clamped = report.clamped_zone_fields,
                "存在负数区间宽度，已修正为 0"
            );
        }

        tracing::info!(
            parsed = report.parsed_count,
            accepted = report.accepted_count(),
            rejected = report.rejected.len(),
            "投影数据导入完成"
        );

        report
    }
}
