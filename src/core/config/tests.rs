use super::data::{path_display, Config};
use super::io::ConfigError;
use crate::utils::url::DEFAULT_BASE_URL;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    assert!(config.markdown_enabled());
    assert!(config.syntax_enabled());
    assert!(config.sidebar_enabled());
    assert_eq!(config.theme_name(), "dark");
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        base_url: Some("http://10.0.0.2:5001/".to_string()),
        theme: Some("light".to_string()),
        markdown: Some(false),
        ..Default::default()
    };
    config.save_to_path(&config_path).expect("save failed");

    let mut loaded = Config::load_from_path(&config_path).expect("load failed");
    assert_eq!(loaded, config);
    assert_eq!(loaded.base_url(), "http://10.0.0.2:5001");
    assert!(!loaded.markdown_enabled());

    loaded.markdown = None;
    loaded.base_url = None;
    loaded.save_to_path(&config_path).expect("second save failed");

    let reloaded = Config::load_from_path(&config_path).expect("reload failed");
    assert!(reloaded.markdown_enabled());
    assert_eq!(reloaded.base_url(), DEFAULT_BASE_URL);
    assert_eq!(reloaded.theme.as_deref(), Some("light"));
}

#[test]
fn test_blank_base_url_falls_back_to_default() {
    let config = Config {
        base_url: Some("  ".to_string()),
        ..Default::default()
    };
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);
}

#[test]
fn test_parse_error_reports_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "markdown = \"maybe\"\n").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("invalid bool must fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at "));
}

#[test]
fn test_unknown_keys_are_tolerated() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "sidebar = false\nfuture_option = 3\n").expect("write");

    let config = Config::load_from_path(&config_path).expect("load");
    assert!(!config.sidebar_enabled());
}

#[cfg(unix)]
#[test]
fn test_path_display_abbreviates_home() {
    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config").join("copilot-chat");
        assert_eq!(path_display(&path), "~/.config/copilot-chat");
    }
}
