// ==========================================
// 库存需求投影看板 - 应用状态
// ==========================================
// 职责: 组装配置与 API 实例,供宿主跨线程共享
// ==========================================

use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{ApiError, ApiResult, ProjectionApi};
use crate::app::store::ProductStore;
use crate::config::{ConfigManager, ProjectionConfig};
use crate::engine::events::ProjectionEventPublisher;

/// 应用状态
///
/// 持有配置快照和唯一的会话 API
pub struct AppState {
    /// 配置快照
    pub config: ProjectionConfig,

    /// 投影 API（会话独占,宿主加锁访问）
    pub projection_api: Arc<Mutex<ProjectionApi>>,
}

impl AppState {
    /// 从默认配置文件 + 环境变量创建
    pub fn new() -> Self {
        Self::from_config_manager(&ConfigManager::load_default())
    }

    /// 从配置管理器创建
    pub fn from_config_manager(manager: &ConfigManager) -> Self {
        Self::with_config(manager.projection_config())
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        tracing::info!(
            edit_mode = %config.edit_mode,
            worker_enabled = config.worker_enabled,
            locale = %config.locale,
            "初始化应用状态"
        );
        let api = ProjectionApi::new(config.clone());
        Self {
            config,
            projection_api: Arc::new(Mutex::new(api)),
        }
    }

    /// 使用自定义事件发布者创建
    pub fn with_publisher(
        config: ProjectionConfig,
        publisher: Arc<dyn ProjectionEventPublisher>,
    ) -> Self {
        let locale = config.locale.clone();
        let store = ProductStore::new(config.clone()).with_publisher(publisher);
        Self {
            config,
            projection_api: Arc::new(Mutex::new(ProjectionApi::with_store(store, locale))),
        }
    }

    /// 获取会话 API 的锁
    pub fn api(&self) -> ApiResult<MutexGuard<'_, ProjectionApi>> {
        self.projection_api
            .lock()
            .map_err(|e| ApiError::InternalError(format!("会话锁获取失败: {}", e)))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(ProjectionConfig::default())
    }
}
