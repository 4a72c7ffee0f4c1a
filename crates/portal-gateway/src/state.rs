use anyhow::Context;
use portal_core::Config;
use std::time::Duration;

/// Shared application state: the loaded configuration and the HTTP client
/// used to forward API calls to the backend.
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create upstream HTTP client")?;

        Ok(Self { config, http })
    }
}
