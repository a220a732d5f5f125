use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use std::time::Duration;

/// Client configuration wrapper.
///
/// Holds the validated `AppConfig` plus the session token, which can change
/// at runtime (login/logout) while the rest of the configuration cannot.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
    token: Option<String>,
}

impl Config {
    /// Wrap an application configuration
    pub fn new(app: AppConfig) -> Self {
        let token = app.auth_token.clone();
        Self { app, token }
    }

    /// Load from the default config file and environment
    pub fn load() -> Result<Self, ConfigError> {
        AppConfig::load().map(Self::new)
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        builder.build().map(Self::new)
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Set the session token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the session token
    pub fn get_token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Full URL of the rewrite endpoint
    pub fn enhance_url(&self) -> String {
        self.app.enhance_url()
    }

    pub fn timeout(&self) -> Duration {
        self.app.timeout()
    }
}
