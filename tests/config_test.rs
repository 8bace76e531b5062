// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 默认值、配置文件解析、环境变量覆写
// ==========================================

use std::collections::HashMap;
use std::io::Write;

use product_projection::config::config_manager::ENV_PREFIX;
use product_projection::config::{config_keys, ConfigManager, ProjectionConfig};
use product_projection::engine::EditMode;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = ConfigManager::new().projection_config();
    assert_eq!(config, ProjectionConfig::default());
    assert_eq!(config.edit_mode, EditMode::DirectSet);
    assert!(config.select_first_date_on_load);
    assert!(config.worker_enabled);
    assert_eq!(config.offload_min_records, 2000);
    assert_eq!(config.worker_queue_capacity, 64);
    assert_eq!(config.locale, "en");
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        r#"{{
            "edit_mode": "CASCADING_DELTA",
            "select_first_date_on_load": false,
            "worker_enabled": "no",
            "offload_min_records": 500,
            "locale": "zh-CN",
            "unknown_key": null
        }}"#
    )
    .expect("Failed to write config");

    let manager = ConfigManager::from_file(file.path()).expect("Failed to load config");
    let config = manager.projection_config();

    assert_eq!(config.edit_mode, EditMode::CascadingDelta);
    assert!(!config.select_first_date_on_load);
    assert!(!config.worker_enabled);
    assert_eq!(config.offload_min_records, 500);
    assert_eq!(config.worker_queue_capacity, 64);
    assert_eq!(config.locale, "zh-CN");
    assert!(manager.get_config_value("unknown_key").is_none());
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let result = ConfigManager::from_file(dir.path().join("absent.json"));
    assert!(result.is_err());
}

#[test]
fn test_malformed_file_is_error() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "edit_mode = DIRECT_SET").expect("Failed to write config");
    assert!(ConfigManager::from_file(file.path()).is_err());
}

#[test]
fn test_invalid_values_fall_back() {
    let mut values = HashMap::new();
    values.insert(config_keys::EDIT_MODE.to_string(), "SIDEWAYS".to_string());
    values.insert(config_keys::WORKER_QUEUE_CAPACITY.to_string(), "0".to_string());
    values.insert(config_keys::OFFLOAD_MIN_RECORDS.to_string(), "-3".to_string());
    values.insert(config_keys::LOCALE.to_string(), "fr".to_string());

    let config = ConfigManager::from_map(values).projection_config();
    assert_eq!(config, ProjectionConfig::default());
}

#[test]
fn test_env_overrides() {
    let mut env = HashMap::new();
    env.insert(format!("{}EDIT_MODE", ENV_PREFIX), "CASCADING_DELTA".to_string());
    env.insert(format!("{}OFFLOAD_MIN_RECORDS", ENV_PREFIX), "10".to_string());

    let mut manager = ConfigManager::new();
    manager.set(config_keys::EDIT_MODE, "DIRECT_SET");
    let manager = manager.with_overrides_from(|name| env.get(name).cloned());
    let config = manager.projection_config();

    assert_eq!(config.edit_mode, EditMode::CascadingDelta);
    assert_eq!(config.offload_min_records, 10);
}
