//! Shared HTTP client for the email-automation backend.
//!
//! Provides a minimal client that attaches the shared `X-API-Key` header,
//! posts multipart bodies, and applies a fixed request timeout. One request
//! per call; nothing here retries. Domain methods (preview, process, test
//! send) live in [`api`].

pub mod api;

use anyhow::{Context, Result};
use portal_core::models::ErrorBody;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Request timeout applied to every backend call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors produced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend answered with a non-success status. `detail` carries the
    /// structured error body's `detail` field when present, otherwise a
    /// per-endpoint fallback message.
    #[error("{detail}")]
    RequestFailed { status: u16, detail: String },

    /// The request could not complete (connectivity, timeout, bad body).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request payload could not be serialized.
    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ClientError {
    /// Message suitable for direct display to the user.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::RequestFailed { detail, .. } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// HTTP client for the backend with shared-secret auth.
#[derive(Clone, Debug)]
pub struct PortalClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PortalClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Create client from environment: BACKEND_URL (default
    /// `http://localhost:8000`) and API_KEY.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        let api_key =
            std::env::var("API_KEY").context("Missing API key. Set API_KEY")?;
        Self::new(base_url, api_key)
    }

    /// Create client from an already-loaded configuration.
    pub fn from_config(config: &portal_core::Config) -> Result<Self> {
        Self::with_timeout(
            config.backend_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a multipart form and deserialize the JSON response.
    ///
    /// On non-success statuses the error body's `detail` field is surfaced;
    /// `fallback` is used when the body is absent or unparseable.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        fallback: &str,
    ) -> Result<T, ClientError> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .header("X-API-Key", self.api_key.as_str())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.detail)
                .unwrap_or_else(|_| fallback.to_string());
            tracing::warn!(status = status.as_u16(), path, "Backend request failed");
            return Err(ClientError::RequestFailed {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = PortalClient::new("http://localhost:8000/", "key").expect("client");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.build_url("/api/preview-email"),
            "http://localhost:8000/api/preview-email"
        );
    }

    #[test]
    fn request_failed_displays_detail_only() {
        let err = ClientError::RequestFailed {
            status: 500,
            detail: "parse error".to_string(),
        };
        assert_eq!(err.to_string(), "parse error");
        assert_eq!(err.user_message("fallback"), "parse error");
    }
}
