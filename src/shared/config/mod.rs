//! Application configuration module
//!
//! Provides the configuration for the enhancement engine and the rewrite
//! service client.
//!
//! # Configuration Sources
//!
//! Values are resolved in increasing priority:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`<config dir>/postcraft/config.toml`, or an explicit path)
//! 3. Environment variables (`POSTCRAFT_API_URL`, `POSTCRAFT_TIMEOUT_SECS`,
//!    `POSTCRAFT_AUTH_TOKEN`)
//!
//! ```toml
//! api_url = "https://api.example.com"
//! enhance_path = "/api/enhance-text"
//! timeout_secs = 45
//! fallback_marker = " (enhanced)"
//! history_limit = 20
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default rewrite service base URL
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Default rewrite endpoint path
pub const DEFAULT_ENHANCE_PATH: &str = "/api/enhance-text";

/// Default request timeout; LLM calls routinely take tens of seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Upper bound accepted for the request timeout
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Marker appended to the selection when the rewrite service fails
pub const DEFAULT_FALLBACK_MARKER: &str = " (enhanced)";

/// Number of accepted patches that can be undone
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Rewrite service base URL
    pub api_url: String,
    /// Path of the rewrite endpoint, appended to `api_url`
    pub enhance_path: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Text appended to the selection by the fallback patch
    pub fallback_marker: String,
    /// Maximum number of undo entries kept
    pub history_limit: usize,
    /// Session token forwarded to the rewrite service
    pub auth_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            enhance_path: DEFAULT_ENHANCE_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            fallback_marker: DEFAULT_FALLBACK_MARKER.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            auth_token: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.api_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                self.api_url,
                url.scheme()
            )));
        }
        if !self.enhance_path.starts_with('/') {
            return Err(ConfigError::InvalidUrl(format!(
                "enhance path '{}' must start with '/'",
                self.enhance_path
            )));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout(self.timeout_secs));
        }
        Ok(())
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the rewrite endpoint
    pub fn enhance_url(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), self.enhance_path)
    }

    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("postcraft").join("config.toml"))
    }

    /// Load configuration from the default file (if present) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => {
                tracing::debug!("No config file found, using defaults and environment");
                let config = Self::default().with_env_overrides()?;
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?.with_env_overrides()?;
        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents)?;
        let defaults = Self::default();

        Ok(Self {
            api_url: file.api_url.unwrap_or(defaults.api_url),
            enhance_path: file.enhance_path.unwrap_or(defaults.enhance_path),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
            fallback_marker: file.fallback_marker.unwrap_or(defaults.fallback_marker),
            history_limit: file.history_limit.unwrap_or(defaults.history_limit),
            auth_token: file.auth_token.or(defaults.auth_token),
        })
    }

    /// Apply `POSTCRAFT_*` environment variables on top of this configuration
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var("POSTCRAFT_API_URL") {
            self.api_url = url;
        }
        if let Ok(raw) = std::env::var("POSTCRAFT_TIMEOUT_SECS") {
            self.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "POSTCRAFT_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
        }
        if let Ok(token) = std::env::var("POSTCRAFT_AUTH_TOKEN") {
            if !token.trim().is_empty() {
                self.auth_token = Some(token);
            }
        }
        Ok(self)
    }
}

/// On-disk representation; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    enhance_path: Option<String>,
    timeout_secs: Option<u64>,
    fallback_marker: Option<String>,
    history_limit: Option<usize>,
    auth_token: Option<String>,
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_url: Option<String>,
    enhance_path: Option<String>,
    timeout_secs: Option<u64>,
    fallback_marker: Option<String>,
    history_limit: Option<usize>,
    auth_token: Option<String>,
}

impl AppConfigBuilder {
    /// Set the rewrite service base URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the rewrite endpoint path
    pub fn enhance_path(mut self, path: impl Into<String>) -> Self {
        self.enhance_path = Some(path.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the fallback marker
    pub fn fallback_marker(mut self, marker: impl Into<String>) -> Self {
        self.fallback_marker = Some(marker.into());
        self
    }

    /// Set the undo history limit
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Set the session token
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            api_url: self.api_url.unwrap_or(defaults.api_url),
            enhance_path: self.enhance_path.unwrap_or(defaults.enhance_path),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            fallback_marker: self.fallback_marker.unwrap_or(defaults.fallback_marker),
            history_limit: self.history_limit.unwrap_or(defaults.history_limit),
            auth_token: self.auth_token,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("timeout must be between 1 and 300 seconds, got {0}")]
    InvalidTimeout(u64),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
