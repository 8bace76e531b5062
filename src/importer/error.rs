// ==========================================
// 库存需求投影看板 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文档相关错误 =====
    #[error("数据文档为空")]
    EmptyDocument,

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    // ===== 字段错误 =====
    #[error("日期格式错误 (行 {row}, 产品 {reference}): 无法解析 {value}")]
    DateFormatError {
        row: usize,
        reference: String,
        value: String,
    },
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
