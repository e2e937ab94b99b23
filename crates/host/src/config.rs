//! Configuration system for the preview host
//!
//! Reads config from ~/.config/battbrrr/preview.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use battbrrr_effects::EffectsConfig;
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http_port: u16,
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            bind: "127.0.0.1".to_string(),
        }
    }
}

/// What `/info.json` reports about the pretend controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub name: String,
    pub version: String,
    /// "AP" or "STA", mirrors the controller's wifi mode
    pub mode: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: "battbrrr".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            mode: "STA".to_string(),
        }
    }
}

/// Full preview configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub device: DeviceConfig,
    /// Backdrop overrides handed to the page through `/config.js`
    pub effects: Option<EffectsConfig>,
}

impl Config {
    /// Load configuration from default path, falling back to defaults
    pub fn load() -> Self {
        let config_path = Self::default_config_path();
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "using default config");
                Self::default()
            }
        }
    }

    /// Get default config path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("battbrrr")
            .join("preview.toml")
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if let Some(effects) = &config.effects {
            effects.validate()?;
        }
        Ok(config)
    }

    /// Write a commented default config if none exists yet
    pub fn create_default_if_missing() -> Result<()> {
        let path = Self::default_config_path();
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let default_config = format!(
            r#"# battbrrr preview configuration

[server]
http_port = 8080
bind = "127.0.0.1"

[device]
name = "battbrrr"
version = "{}"
mode = "STA"

# Backdrop overrides (camelCase, all optional)
# [effects]
# sparkCount = 8
# pulseGapMs = 2200
"#,
            env!("CARGO_PKG_VERSION")
        );
        std::fs::write(&path, default_config).context("Failed to write default config")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.device.mode, "STA");
        assert!(config.effects.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
[device]
version = "1.2.3"
"#,
        )
        .unwrap();
        assert_eq!(config.device.version, "1.2.3");
        assert_eq!(config.device.name, "battbrrr");
        assert_eq!(config.server.http_port, 8080);
    }

    #[test]
    fn test_effects_overrides() {
        let config = Config::from_toml(
            r#"
[effects]
sparkCount = 3
pulseGapMs = 1000.0
"#,
        )
        .unwrap();
        let effects = config.effects.unwrap();
        assert_eq!(effects.spark_count, 3);
        assert_eq!(effects.filament_count, 10);
    }

    #[test]
    fn test_invalid_effects_rejected() {
        assert!(Config::from_toml("[effects]\npulseGapMs = -5.0\n").is_err());
        assert!(Config::from_toml("[effects]\nfilamentCount = 50000\n").is_err());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.toml");
        std::fs::write(&path, "[server]\nhttp_port = 9090\n").unwrap();
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.server.http_port, 9090);
        assert!(Config::load_from_path(&dir.path().join("missing.toml")).is_err());
    }
}
