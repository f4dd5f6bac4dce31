//! Configuration system tests
//!
//! Tests for config paths and register config loading/saving.

use regsheet::config::{CellPadding, ReadOnlyRowEffect, RegisterConfig};
use regsheet::config_paths;
use regsheet::RenderOptions;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("regsheet"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_themes_and_logs_live_under_config_dir() {
    if let (Some(dir), Some(themes), Some(logs)) = (
        config_paths::config_dir(),
        config_paths::themes_dir(),
        config_paths::logs_dir(),
    ) {
        assert!(themes.starts_with(&dir));
        assert!(logs.starts_with(&dir));
    }
}

// ========================================================================
// RegisterConfig Tests
// ========================================================================

#[test]
fn test_default_config() {
    let config = RegisterConfig::default();
    assert_eq!(config.theme, "register-light");
    assert!(!config.use_theme_colors);
    assert_eq!(config.read_only_effect, ReadOnlyRowEffect::DarkenBackground);
    assert_eq!(
        config.padding,
        CellPadding {
            horizontal: 5,
            vertical: 3
        }
    );
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = RegisterConfig {
        theme: "register-dark".to_string(),
        use_theme_colors: true,
        read_only_effect: ReadOnlyRowEffect::LightenForeground,
        padding: CellPadding {
            horizontal: 4,
            vertical: 2,
        },
        font_size: 16.0,
    };
    config.save_to(&path).unwrap();

    let loaded = RegisterConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_saved_yaml_uses_snake_case_effect() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let config = RegisterConfig {
        read_only_effect: ReadOnlyRowEffect::LightenForeground,
        ..RegisterConfig::default()
    };
    config.save_to(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("read_only_effect: lighten_foreground"));
}

#[test]
fn test_load_from_missing_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = RegisterConfig::load_from(&dir.path().join("missing.yaml")).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read config"));
}

#[test]
fn test_load_from_invalid_yaml_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "read_only_effect: sparkle\n").unwrap();

    let err = RegisterConfig::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

#[test]
fn test_render_options_projection() {
    let config = RegisterConfig {
        use_theme_colors: true,
        read_only_effect: ReadOnlyRowEffect::None,
        padding: CellPadding {
            horizontal: 7,
            vertical: 1,
        },
        ..RegisterConfig::default()
    };
    let options = RenderOptions::from(&config);
    assert!(options.use_theme_colors);
    assert_eq!(options.read_only_effect, ReadOnlyRowEffect::None);
    assert_eq!(options.padding.horizontal, 7);
}
