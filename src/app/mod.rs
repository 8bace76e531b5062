// ==========================================
// 库存需求投影看板 - 应用层
// ==========================================
// 职责: 会话状态持有者与宿主共享状态
// ==========================================

pub mod state;
pub mod store;

pub use state::AppState;
pub use store::{ProductStore, SessionPhase};
