//! Configuration module
//!
//! Settings come from a TOML file (default `~/.config/stay-engine/config.toml`,
//! overridable via the `STAY_ENGINE_CONFIG` environment variable). Every
//! section is optional and falls back to its defaults, so an empty or missing
//! file still yields a runnable server.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
}

impl Config {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl From<&AppConfig> for Config {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            host: cfg.server.host.clone(),
            port: cfg.server.port,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Full application configuration as read from the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub logging: LoggingSection,
    pub pricing: PricingSection,
    /// Optional property snapshot loaded into the in-memory store at startup
    pub data_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default tracing filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PricingSection {
    /// Flat tax rate applied on top of the pre-tax stay total
    pub tax_percent: f64,
}

/// `~/.config/stay-engine/config.toml`, or a relative fallback when the
/// platform config directory cannot be determined
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stay-engine")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.pricing.tax_percent, 0.0);
        assert!(cfg.data_file.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [pricing]
            tax_percent = 10.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.pricing.tax_percent, 10.0);
    }

    #[test]
    fn address_joins_host_and_port() {
        let config = Config::new("127.0.0.1", 3000);
        assert_eq!(config.address(), "127.0.0.1:3000");
    }
}
