// ==========================================
// 库存需求投影看板 - 核心库
// ==========================================
// 职责: 按缓冲区间为投影记录着色,并维护按日期的颜色汇总
// 系统定位: 计划员查看 / 编辑按单生产量的会话引擎
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与颜色
pub mod domain;

// 引擎层 - 着色、索引、汇总、编辑
pub mod engine;

// 导入层 - JSON 数据源
pub mod importer;

// 配置层 - 会话行为配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 展示层接口
pub mod api;

// 应用层 - 会话状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{CellColor, ColorSummary, ProductDataResponse, ProductRecord};

// 引擎
pub use engine::{
    apply_edit, classify, summarize, CalculationService, CalculationWorker, EditMode,
    EditOutcome, InlineCalculator, ProjectionIndex,
};

// 导入
pub use importer::{parse_product_data_strict, ImportError, ImportReport};

// API / 应用
pub use api::{ApiError, ApiResult, ProjectionApi};
pub use app::{AppState, ProductStore, SessionPhase};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "product-projection";
