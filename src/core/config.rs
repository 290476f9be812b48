//! Configuration management for lexaid.
//!
//! Handles loading and saving configuration from TOML files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Model backend settings
    pub ai: AiConfig,

    /// Retry budget for the flows that mask transient overload
    pub retry: RetryConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Jurisdiction used when a command does not pass one explicitly
    pub default_jurisdiction: String,
}

/// Model backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Model backend (gemini, claude)
    pub provider: String,

    /// Model override; each backend has its own default
    pub model: Option<String>,
}

/// Retry settings for overload-masked flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempt budget, including the first call
    pub max_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            ai: AiConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { default_jurisdiction: "United States".to_string() }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self { provider: "gemini".to_string(), model: None }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl Config {
    /// Path of the config file (`<config dir>/lexaid/config.toml`).
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lexaid").join("config.toml"))
    }

    /// Load configuration, falling back to defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Save configuration to its default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = Self::path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.default_jurisdiction, "United States");
        assert_eq!(config.ai.provider, "gemini");
        assert!(config.ai.model.is_none());
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [ai]
            provider = "claude"
            model = "claude-sonnet-4-20250514"
            "#,
        )
        .unwrap();

        assert_eq!(config.ai.provider, "claude");
        assert_eq!(config.ai.model.as_deref(), Some("claude-sonnet-4-20250514"));
        assert_eq!(config.general.default_jurisdiction, "United States");
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.general.default_jurisdiction = "California".to_string();
        config.retry.max_attempts = 5;

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.general.default_jurisdiction, "California");
        assert_eq!(parsed.retry.max_attempts, 5);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\ndefault_jurisdiction = \"Texas\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.general.default_jurisdiction, "Texas");
    }
}
