// ==========================================
// 库存需求投影看板 - 配置层
// ==========================================
// 职责: 会话行为配置（编辑模式、worker 阈值、语言等）
// 存储: JSON 键值文件 + 环境变量覆写
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_config_path, ConfigManager, ProjectionConfig};
