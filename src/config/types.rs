//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::catalog::CatalogEntry;
use super::channels::ChannelsConfig;
use super::limits::LimitsConfig;
use super::security::SecurityConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Daemon configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Process-level settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Channel rule toggles and thresholds.
    #[serde(default)]
    pub channels: ChannelsConfig,
    /// Security configuration (speech rate limiting).
    #[serde(default)]
    pub security: SecurityConfig,
    /// Actor and name limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Built-in channel catalog. Empty means the default catalog.
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// Process-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// Prometheus metrics HTTP port; 0 disables the endpoint.
    #[serde(default)]
    pub metrics_port: u16,
}
