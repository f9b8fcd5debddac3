//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{ApiClientConfig, DEFAULT_BASE_URL};
use crate::dashboard::DashboardOptions;
use crate::stats::DEFAULT_CHART_DAYS;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Statistics API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means no client-side timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("covid-dashboard/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Settings for [`crate::api::CovidApiClient`]
    pub fn client_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Dashboard behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_chart_days")]
    pub chart_days: usize,

    /// Limit on printed ranking rows; unset prints all
    #[serde(default)]
    pub top_countries: Option<usize>,

    /// Fetch deaths/recovered series alongside confirmed
    #[serde(default)]
    pub detail_panels: bool,
}

fn default_chart_days() -> usize {
    DEFAULT_CHART_DAYS
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_days: default_chart_days(),
            top_countries: None,
            detail_panels: false,
        }
    }
}

impl DashboardConfig {
    /// Settings for [`crate::dashboard::Dashboard`]
    pub fn options(&self) -> DashboardOptions {
        DashboardOptions {
            chart_days: self.chart_days,
            detail_panels: self.detail_panels,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
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
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("covid-dashboard").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("COVID_DASHBOARD_API_URL") {
            self.api.base_url = url;
        }
        if let Some(flag) = lookup("COVID_DASHBOARD_DETAIL_PANELS") {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.dashboard.detail_panels = true,
                "0" | "false" | "no" | "off" => self.dashboard.detail_panels = false,
                other => tracing::warn!("Ignoring COVID_DASHBOARD_DETAIL_PANELS={}", other),
            }
        }
        if let Some(level) = lookup("COVID_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("COVID_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Covid Dashboard Configuration
#
# Environment variables override these settings:
# - COVID_DASHBOARD_API_URL
# - COVID_DASHBOARD_DETAIL_PANELS
# - COVID_DASHBOARD_LOG_LEVEL
# - COVID_DASHBOARD_LOG_FORMAT

[api]
# Statistics API base URL
base_url = "https://ts-covid-api.vercel.app"

# Request timeout in seconds (unset: wait for the server)
# request_timeout_secs = 30

[dashboard]
# Trailing days plotted on the trend chart
chart_days = 14

# Only print this many ranking rows (unset: all)
# top_countries = 20

# Also fetch deaths/recovered series for the selected country.
# The public API no longer serves these for most countries.
detail_panels = false

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.api.request_timeout_secs.is_none());
        assert_eq!(config.dashboard.chart_days, 14);
        assert!(!config.dashboard.detail_panels);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.dashboard.chart_days, 14);
        assert!(config.dashboard.top_countries.is_none());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse(
            r#"
            [api]
            base_url = "http://localhost:9000"
            request_timeout_secs = 5

            [dashboard]
            top_countries = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:9000");
        let client = config.api.client_config();
        assert_eq!(client.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.dashboard.top_countries, Some(10));
        assert_eq!(config.dashboard.chart_days, 14);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[dashboard]\nchart_days = 7\ndetail_panels = true\n").unwrap();

        let config = Config::load(&path).unwrap();
        let options = config.dashboard.options();
        assert_eq!(options.chart_days, 7);
        assert!(options.detail_panels);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[dashboard\nchart_days = ").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("COVID_DASHBOARD_API_URL", "http://mirror.test"),
            ("COVID_DASHBOARD_DETAIL_PANELS", "yes"),
            ("COVID_DASHBOARD_LOG_FORMAT", "json"),
        ]);

        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://mirror.test");
        assert!(config.dashboard.detail_panels);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }
}
