// ==========================================
// 库存需求投影看板 - 引擎层
// ==========================================
// 职责: 着色判定、索引、汇总、编辑、计算 worker
// 红线: 引擎函数无 I/O,同步执行至完成（worker 除外）
// ==========================================

pub mod aggregator;
pub mod classifier;
pub mod events;
pub mod indexer;
pub mod mutator;
pub mod worker;

// 重导出核心引擎
pub use aggregator::{scope_size, summarize, summarize_all};
pub use classifier::{classify, classify_record};
pub use events::{
    ChannelEventPublisher, NoOpEventPublisher, ProjectionEvent, ProjectionEventPublisher,
    ProjectionEventType,
};
pub use indexer::ProjectionIndex;
pub use mutator::{apply_edit, EditMode, EditOutcome};
pub use worker::{CalculationService, CalculationWorker, InlineCalculator, WorkerError};
