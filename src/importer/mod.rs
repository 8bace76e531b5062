// ==========================================
// 库存需求投影看板 - 导入层
// ==========================================
// 职责: 解析 JSON 数据源,清洗为可索引的投影记录
// 红线: 数据源格式错误不抛给调用方,退化为空数据集
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod json_parser;
pub mod product_importer;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use json_parser::parse_product_data_strict;
pub use product_importer::{ImportReport, JsonProductImporter, ProductImporter};
