// ==========================================
// 库存需求投影看板 - JSON 数据源解析
// ==========================================
// 格式: {"Datos": 记录} 或 {"Datos": [记录...]}
// 文档级错误由 JsonProductImporter 记入 ImportReport 并退化为空数据集
// ==========================================

use crate::domain::product::{ProductDataResponse, ProductRecord};
use crate::importer::error::{ImportError, ImportResult};

/// 严格解析: 返回失败原因
///
/// # 返回
/// - Ok(Vec<ProductRecord>): 解析出的记录（缺失 Datos 时为空）
/// - Err(ImportError::EmptyDocument): 文档为空白
/// - Err(ImportError::JsonParseError): JSON 非法
pub fn parse_product_data_strict(json_data: &str) -> ImportResult<Vec<ProductRecord>> {
    if json_data.trim().is_empty() {
        return Err(ImportError::EmptyDocument);
    }

    let response: ProductDataResponse = serde_json::from_str(json_data)?;
    Ok(response.into_records())
}
