// ==========================================
// 库存需求投影看板 - API 层
// ==========================================
// 职责: 面向展示层的接口（文本输入解析、视图模型、错误码）
// ==========================================

pub mod error;
pub mod projection_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use projection_api::{
    parse_edit_value, GridCell, GridRow, GridView, ProjectionApi, SummaryEntry, SummaryView,
};
