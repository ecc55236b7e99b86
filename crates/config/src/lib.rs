//! Configuration loading, validation, and management for Swarmlet.
//!
//! Loads configuration from `~/.swarmlet/config.toml` with environment
//! variable overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swarmlet_core::ProviderKind;

/// The root configuration structure.
///
/// Maps directly to `~/.swarmlet/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generic API key, used when a provider has no key of its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default backend kind for agents built by the CLI
    #[serde(default = "default_provider")]
    pub default_provider: ProviderKind,

    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// OpenAI backend settings
    #[serde(default)]
    pub openai: ProviderSettings,

    /// Anthropic backend settings
    #[serde(default)]
    pub anthropic: ProviderSettings,

    /// Network loop settings
    #[serde(default)]
    pub network: NetworkSettings,
}

fn default_provider() -> ProviderKind {
    ProviderKind::OpenAi
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.7
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("openai", &self.openai)
            .field("anthropic", &self.anthropic)
            .field("network", &self.network)
            .finish()
    }
}

/// Settings for one backend kind.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Provider-specific API key (falls back to the top-level `api_key`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override the API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Default model for this backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Settings for the network run loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Maximum agent invocations per run
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

fn default_max_iter() -> usize {
    10
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.swarmlet/config.toml).
    ///
    /// Also checks environment variables:
    /// - `SWARMLET_API_KEY` (generic key, highest priority)
    /// - `OPENAI_API_KEY`, `ANTHROPIC_API_KEY` (per-provider keys)
    /// - `SWARMLET_MODEL` (default model override)
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.api_key.is_none() {
            config.api_key = std::env::var("SWARMLET_API_KEY").ok();
        }
        if config.openai.api_key.is_none() {
            config.openai.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if config.anthropic.api_key.is_none() {
            config.anthropic.api_key = std::env::var("ANTHROPIC_API_KEY").ok();
        }
        if let Ok(model) = std::env::var("SWARMLET_MODEL") {
            config.default_model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".swarmlet")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::Validation(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.network.max_iter == 0 {
            return Err(ConfigError::Validation(
                "network.max_iter must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// The key that applies to a backend kind: its own, then the generic one.
    pub fn key_for(&self, kind: ProviderKind) -> Option<&str> {
        let settings = self.settings_for(kind);
        settings
            .api_key
            .as_deref()
            .or(self.api_key.as_deref())
    }

    /// The settings table for a backend kind.
    pub fn settings_for(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
        }
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            openai: ProviderSettings::default(),
            anthropic: ProviderSettings::default(),
            network: NetworkSettings::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.default_provider, ProviderKind::OpenAi);
        assert_eq!(config.network.max_iter, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_provider, config.default_provider);
        assert_eq!(parsed.network.max_iter, config.network.max_iter);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            default_temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_max_iter_rejected() {
        let config = AppConfig {
            network: NetworkSettings { max_iter: 0 },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().default_model, "gpt-4o-mini");
    }

    #[test]
    fn parse_provider_tables() {
        let toml_str = r#"
default_provider = "anthropic"

[anthropic]
api_key = "sk-ant-test"
model = "claude-sonnet-4"

[network]
max_iter = 5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_provider, ProviderKind::Anthropic);
        assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant-test"));
        assert_eq!(config.network.max_iter, 5);
    }

    #[test]
    fn key_fallback_chain() {
        let config = AppConfig {
            api_key: Some("generic".into()),
            openai: ProviderSettings {
                api_key: Some("openai-specific".into()),
                ..ProviderSettings::default()
            },
            ..AppConfig::default()
        };
        assert_eq!(config.key_for(ProviderKind::OpenAi), Some("openai-specific"));
        assert_eq!(config.key_for(ProviderKind::Anthropic), Some("generic"));
    }

    #[test]
    fn debug_redacts_keys() {
        let config = AppConfig {
            api_key: Some("sk-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_model = \"gpt-4o\"").unwrap();
        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.default_model, "gpt-4o");
    }

    #[test]
    fn invalid_toml_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_model = [not toml").unwrap();
        assert!(matches!(
            AppConfig::load_from(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("gpt-4o-mini"));
        assert!(toml_str.contains("max_iter"));
    }
}
