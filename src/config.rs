//! Service configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `D3E__SECTION__KEY` environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "D3E_CONFIG";

/// Default configuration file, looked up relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub matcher: MatcherSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound for request bodies, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Dismantling catalog source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// File path or http(s) URL of the catalog JSON resource
    #[serde(default = "default_catalog_source")]
    pub source: String,

    /// Fetch timeout for remote sources
    #[serde(default = "default_catalog_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_catalog_source() -> String {
    "data/dismantling_catalog.json".to_string()
}

fn default_catalog_timeout_ms() -> u64 {
    5000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: default_catalog_source(),
            timeout_ms: default_catalog_timeout_ms(),
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Category matcher tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherSettings {
    /// Minimum similarity score for a subcategory to be accepted
    #[serde(default = "default_min_score")]
    pub min_score: u32,
}

fn default_min_score() -> u32 {
    20
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
        }
    }
}

/// Checklist session retention
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Sessions untouched for this long are dropped
    #[serde(default = "default_idle_ttl_secs")]
    pub idle_ttl_secs: u64,

    /// Live sessions kept at most; the least recently updated goes first
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_idle_ttl_secs() -> u64 {
    8 * 3600
}

fn default_max_sessions() -> usize {
    10_000
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_ttl_secs: default_idle_ttl_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl SessionSettings {
    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_secs)
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load from a TOML file (optional) and the environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix("D3E")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load using `D3E_CONFIG` or the default path, after reading `.env`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_file(path)
    }

    /// Parse configuration from a TOML string, without environment overrides
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(text, ::config::FileFormat::Toml))
            .build()?;
        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate that the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port cannot be 0".to_string()));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than 0".to_string(),
            ));
        }
        if self.catalog.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "catalog.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.session.idle_ttl_secs == 0 || self.session.max_sessions == 0 {
            return Err(ConfigError::Invalid(
                "session.idle_ttl_secs and session.max_sessions must be greater than 0".to_string(),
            ));
        }
        if self.catalog.source.trim().is_empty() {
            return Err(ConfigError::Invalid("catalog.source cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.matcher.min_score, 20);
        assert_eq!(config.catalog.source, "data/dismantling_catalog.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [server]
            port = 9090

            [matcher]
            min_score = 35
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.matcher.min_score, 35);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = Config::from_toml_str(
            r#"
            [catalog]
            timeout_ms = 0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bind_address() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8081");
    }

    #[test]
    fn test_session_section() {
        let config = Config::from_toml_str(
            r#"
            [session]
            idle_ttl_secs = 600
            "#,
        )
        .unwrap();
        assert_eq!(config.session.idle_ttl().as_secs(), 600);
        assert_eq!(config.session.max_sessions, 10_000);

        let result = Config::from_toml_str(
            r#"
            [session]
            max_sessions = 0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
