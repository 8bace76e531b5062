// ==========================================
// 库存需求投影看板 - 领域模型层
// ==========================================
// 职责: 定义投影记录、着色状态、颜色汇总
// 红线: 不含解析逻辑,不含引擎逻辑
// ==========================================

pub mod calendar;
pub mod product;
pub mod summary;
pub mod types;

// 重导出核心类型
pub use calendar::{format_calendar_date, parse_calendar_date, parse_forecast_date};
pub use product::{ProductDataResponse, ProductRecord};
pub use summary::ColorSummary;
pub use types::CellColor;
