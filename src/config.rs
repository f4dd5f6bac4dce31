//! Register configuration persistence
//!
//! Stores user preferences in `~/.config/regsheet/config.yaml`

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Visual treatment of read-only rows (those above the upper divider).
///
/// At most one effect is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadOnlyRowEffect {
    /// Darken the raw background color by 10%
    #[default]
    DarkenBackground,
    /// Lighten the raw foreground color towards white
    LightenForeground,
    None,
}

/// Text inset inside a cell, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellPadding {
    pub horizontal: i32,
    pub vertical: i32,
}

impl Default for CellPadding {
    fn default() -> Self {
        Self {
            horizontal: 5,
            vertical: 3,
        }
    }
}

/// Register configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterConfig {
    /// Theme id (e.g. "register-light") or path to a theme YAML file
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Use theme category colors instead of the table's raw colors
    #[serde(default)]
    pub use_theme_colors: bool,
    #[serde(default)]
    pub read_only_effect: ReadOnlyRowEffect,
    #[serde(default)]
    pub padding: CellPadding,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

fn default_theme() -> String {
    "register-light".to_string()
}

fn default_font_size() -> f32 {
    14.0
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            use_theme_colors: false,
            read_only_effect: ReadOnlyRowEffect::default(),
            padding: CellPadding::default(),
            font_size: default_font_size(),
        }
    }
}

impl RegisterConfig {
    /// Load config from the user config directory, or return defaults if
    /// missing or unreadable
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Save config to the user config directory
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file()
            .context("No config directory available")?;
        self.save_to(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: RegisterConfig = serde_yaml::from_str("use_theme_colors: true\n").unwrap();
        assert!(config.use_theme_colors);
        assert_eq!(config.theme, "register-light");
        assert_eq!(config.read_only_effect, ReadOnlyRowEffect::DarkenBackground);
        assert_eq!(config.padding, CellPadding::default());
        assert_eq!(config.font_size, 14.0);
    }

    #[test]
    fn test_effect_names_are_snake_case() {
        let config: RegisterConfig =
            serde_yaml::from_str("read_only_effect: lighten_foreground\n").unwrap();
        assert_eq!(config.read_only_effect, ReadOnlyRowEffect::LightenForeground);

        let config: RegisterConfig = serde_yaml::from_str("read_only_effect: none\n").unwrap();
        assert_eq!(config.read_only_effect, ReadOnlyRowEffect::None);
    }

    #[test]
    fn test_partial_padding() {
        let config: RegisterConfig =
            serde_yaml::from_str("padding:\n  horizontal: 8\n").unwrap();
        assert_eq!(config.padding.horizontal, 8);
        assert_eq!(config.padding.vertical, 3);
    }
}
