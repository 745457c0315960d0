//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::fetch::RateWindow;
use crate::riot::{RetryPolicy, DEFAULT_HOST_TEMPLATE, MAX_MATCH_COUNT};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("{0} not found in environment or .env file")]
    MissingApiKey(String),
}

/// Riot API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiotConfig {
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// API host, `{route}` is replaced by the region or platform code
    #[serde(default = "default_host_template")]
    pub api_host_template: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Recent matches compared per player
    #[serde(default = "default_match_count")]
    pub match_count: usize,

    /// Retries after a 429 response
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Cap on a single Retry-After wait
    #[serde(default = "default_max_retry_wait")]
    pub max_retry_wait_seconds: u64,
}

fn default_api_key_env() -> String {
    "RIOT_API_KEY".to_string()
}

fn default_host_template() -> String {
    DEFAULT_HOST_TEMPLATE.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_match_count() -> usize {
    3
}

fn default_max_retries() -> u32 {
    1
}

fn default_max_retry_wait() -> u64 {
    10
}

impl Default for RiotConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            api_host_template: default_host_template(),
            timeout_seconds: default_timeout(),
            match_count: default_match_count(),
            max_retries: default_max_retries(),
            max_retry_wait_seconds: default_max_retry_wait(),
        }
    }
}

impl RiotConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            max_wait: Duration::from_secs(self.max_retry_wait_seconds),
        }
    }
}

/// Request budget shared by every call. Defaults match a development key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_short_requests")]
    pub short_window_requests: u32,

    #[serde(default = "default_short_seconds")]
    pub short_window_seconds: u64,

    #[serde(default = "default_long_requests")]
    pub long_window_requests: u32,

    #[serde(default = "default_long_seconds")]
    pub long_window_seconds: u64,
}

fn default_short_requests() -> u32 {
    20
}

fn default_short_seconds() -> u64 {
    1
}

fn default_long_requests() -> u32 {
    100
}

fn default_long_seconds() -> u64 {
    120
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            short_window_requests: default_short_requests(),
            short_window_seconds: default_short_seconds(),
            long_window_requests: default_long_requests(),
            long_window_seconds: default_long_seconds(),
        }
    }
}

impl RateLimitConfig {
    pub fn windows(&self) -> Vec<RateWindow> {
        vec![
            RateWindow::new(
                self.short_window_requests,
                Duration::from_secs(self.short_window_seconds),
            ),
            RateWindow::new(
                self.long_window_requests,
                Duration::from_secs(self.long_window_seconds),
            ),
        ]
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub riot: RiotConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            riot: RiotConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.riot.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Riot timeout must be greater than 0".to_string(),
            ));
        }

        if self.riot.match_count == 0 || self.riot.match_count > MAX_MATCH_COUNT {
            return Err(ConfigError::ValidationError(format!(
                "match_count must be between 1 and {}",
                MAX_MATCH_COUNT
            )));
        }

        if !self.riot.api_host_template.contains("{route}") {
            return Err(ConfigError::ValidationError(
                "api_host_template must contain {route}".to_string(),
            ));
        }

        let rl = &self.rate_limit;
        if rl.short_window_requests == 0
            || rl.long_window_requests == 0
            || rl.short_window_seconds == 0
            || rl.long_window_seconds == 0
        {
            return Err(ConfigError::ValidationError(
                "Rate limit windows must allow at least 1 request per non-zero period".to_string(),
            ));
        }

        Ok(())
    }

    /// Read the API key from the configured environment variable, loading
    /// `.env` first.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        let _ = dotenvy::dotenv();
        read_api_key(&self.riot.api_key_env)
    }
}

fn read_api_key(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingApiKey(var.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.riot.api_key_env, "RIOT_API_KEY");
        assert_eq!(config.riot.match_count, 3);
        assert_eq!(config.rate_limit.short_window_requests, 20);
        assert_eq!(config.rate_limit.long_window_seconds, 120);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_timeout() {
        let mut config = AppConfig::default();
        config.riot.timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_match_count_bounds() {
        let mut config = AppConfig::default();
        config.riot.match_count = 0;
        assert!(config.validate().is_err());

        config.riot.match_count = 101;
        assert!(config.validate().is_err());

        config.riot.match_count = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_host_template() {
        let mut config = AppConfig::default();
        config.riot.api_host_template = "https://na1.api.riotgames.com".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rate_limit() {
        let mut config = AppConfig::default();
        config.rate_limit.long_window_requests = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rate_windows() {
        let windows = RateLimitConfig::default().windows();
        assert_eq!(windows[0], RateWindow::new(20, Duration::from_secs(1)));
        assert_eq!(windows[1], RateWindow::new(100, Duration::from_secs(120)));
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\n\n[riot]\nmatch_count = 10\n\n[rate_limit]\nshort_window_requests = 500\nshort_window_seconds = 10"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.riot.match_count, 10);
        assert_eq!(config.riot.timeout_seconds, 10);
        assert_eq!(config.rate_limit.short_window_requests, 500);
        assert_eq!(config.rate_limit.long_window_requests, 100);
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[riot]\nmatch_count = 0").unwrap();

        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_from_file_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[riot\nmatch_count = ").unwrap();

        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.riot.match_count, 3);
    }

    #[test]
    fn test_read_api_key() {
        std::env::set_var("RIFT_COMPARE_TEST_KEY", "  RGAPI-abc  ");
        assert_eq!(read_api_key("RIFT_COMPARE_TEST_KEY").unwrap(), "RGAPI-abc");

        std::env::set_var("RIFT_COMPARE_TEST_EMPTY", "");
        assert!(matches!(
            read_api_key("RIFT_COMPARE_TEST_EMPTY"),
            Err(ConfigError::MissingApiKey(_))
        ));
        assert!(read_api_key("RIFT_COMPARE_TEST_UNSET").is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.riot.api_host_template, parsed.riot.api_host_template);
    }
}
