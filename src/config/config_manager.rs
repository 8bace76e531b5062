// ==========================================
// 库存需求投影看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: key-value（JSON 对象文件）
// 覆写: 环境变量 PRODUCT_PROJECTION_<KEY>（键名大写）
// 红线: 非法配置值回退默认值并记录 warn,不中断启动
// ==========================================

use crate::engine::mutator::EditMode;
use crate::i18n::SUPPORTED_LOCALES;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "PRODUCT_PROJECTION_";

// ==========================================
// ProjectionConfig - 类型化配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub edit_mode: EditMode,
    pub select_first_date_on_load: bool,
    pub worker_enabled: bool,
    pub offload_min_records: usize,
    pub worker_queue_capacity: usize,
    pub locale: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            edit_mode: EditMode::DirectSet,
            select_first_date_on_load: true,
            worker_enabled: true,
            offload_min_records: 2000,
            worker_queue_capacity: 64,
            locale: "en".to_string(),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 空配置（全部取默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从键值映射创建
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// 从 JSON 对象文本创建
    ///
    /// 值可以是字符串、数字或布尔,统一存为字符串
    pub fn from_json_str(raw: &str) -> Result<Self, Box<dyn Error>> {
        let parsed: HashMap<String, serde_json::Value> = serde_json::from_str(raw)?;

        let values = parsed
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => return None,
                    other => other.to_string(),
                };
                Some((key, text))
            })
            .collect();

        Ok(Self { values })
    }

    /// 从 JSON 文件创建
    ///
    /// # 返回
    /// - Ok(ConfigManager): 加载成功
    /// - Err: 文件不可读或格式错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("配置文件读取失败 ({}): {}", path.as_ref().display(), e))?;
        Self::from_json_str(&raw)
    }

    /// 从默认位置加载（文件不存在或不可用时返回空配置）,并应用环境变量覆写
    pub fn load_default() -> Self {
        let base = match default_config_path() {
            Some(path) if path.exists() => match Self::from_file(&path) {
                Ok(manager) => {
                    tracing::info!("加载配置文件: {}", path.display());
                    manager
                }
                Err(e) => {
                    tracing::warn!("配置文件加载失败，使用默认配置: {}", e);
                    Self::new()
                }
            },
            _ => Self::new(),
        };

        base.with_env_overrides()
    }

    /// 应用环境变量覆写
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// 应用覆写（`lookup` 接收完整变量名,如 PRODUCT_PROJECTION_EDIT_MODE）
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in config_keys::ALL {
            let name = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            if let Some(value) = lookup(&name) {
                tracing::debug!(config_key = key, "环境变量覆写配置");
                self.values.insert(key.to_string(), value);
            }
        }
        self
    }

    /// 设置配置值
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取原始配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.trim())
    }

    fn get_parsed_or_default<T, F>(&self, key: &str, default: T, parse: F) -> T
    where
        F: Fn(&str) -> Option<T>,
    {
        match self.get_config_value(key) {
            None => default,
            Some(raw) => parse(raw).unwrap_or_else(|| {
                tracing::warn!(config_key = key, raw_value = raw, "配置值格式错误，使用默认值");
                default
            }),
        }
    }

    // ===== 编辑配置 =====

    pub fn get_edit_mode(&self) -> EditMode {
        self.get_parsed_or_default(config_keys::EDIT_MODE, EditMode::DirectSet, EditMode::parse)
    }

    pub fn get_select_first_date_on_load(&self) -> bool {
        self.get_parsed_or_default(config_keys::SELECT_FIRST_DATE_ON_LOAD, true, parse_bool)
    }

    // ===== worker 配置 =====

    pub fn get_worker_enabled(&self) -> bool {
        self.get_parsed_or_default(config_keys::WORKER_ENABLED, true, parse_bool)
    }

    pub fn get_offload_min_records(&self) -> usize {
        self.get_parsed_or_default(config_keys::OFFLOAD_MIN_RECORDS, 2000, |s| {
            s.parse::<usize>().ok()
        })
    }

    pub fn get_worker_queue_capacity(&self) -> usize {
        self.get_parsed_or_default(config_keys::WORKER_QUEUE_CAPACITY, 64, |s| {
            s.parse::<usize>().ok().filter(|&n| n > 0)
        })
    }

    // ===== 展示配置 =====

    pub fn get_locale(&self) -> String {
        self.get_parsed_or_default(config_keys::LOCALE, "en".to_string(), |s| {
            SUPPORTED_LOCALES.contains(&s).then(|| s.to_string())
        })
    }

    /// 生成类型化配置快照
    pub fn projection_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            edit_mode: self.get_edit_mode(),
            select_first_date_on_load: self.get_select_first_date_on_load(),
            worker_enabled: self.get_worker_enabled(),
            offload_min_records: self.get_offload_min_records(),
            worker_queue_capacity: self.get_worker_queue_capacity(),
            locale: self.get_locale(),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// 默认配置文件位置: <config_dir>/product-projection/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("product-projection").join("config.json"))
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 编辑
    pub const EDIT_MODE: &str = "edit_mode";
    pub const SELECT_FIRST_DATE_ON_LOAD: &str = "select_first_date_on_load";

    // worker
    pub const WORKER_ENABLED: &str = "worker_enabled";
    pub const OFFLOAD_MIN_RECORDS: &str = "offload_min_records";
    pub const WORKER_QUEUE_CAPACITY: &str = "worker_queue_capacity";

    // 展示
    pub const LOCALE: &str = "locale";

    pub const ALL: [&str; 6] = [
        EDIT_MODE,
        SELECT_FIRST_DATE_ON_LOAD,
        WORKER_ENABLED,
        OFFLOAD_MIN_RECORDS,
        WORKER_QUEUE_CAPACITY,
        LOCALE,
    ];
}
