//! Rewrite Service Client
//!
//! Async HTTP client for the external rewrite service, and the
//! `RewriteService` trait the session uses so that tests and alternative
//! backends can stand in for it.

use crate::client::config::Config;
use crate::shared::enhance::{EnhanceRequest, EnhanceResponse};
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Client;
use std::future::Future;

pub use crate::shared::error::RewriteError;

/// Name of the session cookie forwarded to the rewrite service
pub const AUTH_COOKIE: &str = "auth_token";

/// Something that can rewrite a selection
pub trait RewriteService: Send + Sync + 'static {
    /// Ask for an enhanced version of `request.selected_text`
    fn rewrite(
        &self,
        request: EnhanceRequest,
    ) -> impl Future<Output = Result<EnhanceResponse, RewriteError>> + Send;
}

/// HTTP rewrite client
#[derive(Debug, Clone)]
pub struct RewriteClient {
    config: Config,
    client: Client,
}

impl RewriteClient {
    pub fn new(config: Config) -> Result<Self, RewriteError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RewriteError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn send(&self, request: &EnhanceRequest) -> Result<EnhanceResponse, RewriteError> {
        let url = self.config.enhance_url();

        let mut builder = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(request);
        if let Some(token) = self.config.get_token() {
            builder = builder.header(COOKIE, format!("{}={}", AUTH_COOKIE, token));
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                RewriteError::Timeout(self.config.timeout())
            } else {
                RewriteError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(RewriteError::status(status.as_u16(), error_text));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                RewriteError::Timeout(self.config.timeout())
            } else {
                RewriteError::Network(e.to_string())
            }
        })?;
        let parsed: EnhanceResponse =
            serde_json::from_str(&body).map_err(|e| RewriteError::Malformed(e.to_string()))?;

        if parsed.enhanced_text().is_none() {
            return Err(RewriteError::MissingEnhancedText);
        }
        Ok(parsed)
    }
}

impl RewriteService for RewriteClient {
    async fn rewrite(&self, request: EnhanceRequest) -> Result<EnhanceResponse, RewriteError> {
        tracing::debug!(
            "[REWRITE] POST {} ({}, {} chars selected)",
            self.config.enhance_url(),
            request.enhance_type.as_str(),
            request.selected_text.chars().count()
        );

        let result = self.send(&request).await;
        match &result {
            Ok(_) => tracing::debug!("[REWRITE] Enhanced text received"),
            Err(e) => tracing::warn!("[REWRITE] Request failed: {}", e),
        }
        result
    }
}
