//! Configuration module
//!
//! Environment-driven configuration for the gateway process and the upload
//! client. All values are read once at process start.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_STATIC_DIR: &str = "out";
const MAX_FILE_SIZE_MB: usize = 10;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub backend_url: String,
    pub api_key: String,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub static_dir: String,
    pub max_file_size_bytes: usize,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: env::var("API_KEY")
                .map_err(|_| anyhow::anyhow!("API_KEY must be set for backend authentication"))?,
            cors_origins,
            environment,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(REQUEST_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("API_KEY cannot be empty"));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(anyhow::anyhow!("BACKEND_URL must be an http(s) URL"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 3000,
            backend_url: "http://localhost:8000".to_string(),
            api_key: "test-key".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            environment: "development".to_string(),
            static_dir: "out".to_string(),
            max_file_size_bytes: 10 * 1024 * 1024,
            request_timeout_secs: 30,
        }
    }

    #[test]
    fn validate_accepts_explicit_origins() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_wildcard_origin_in_production() {
        let mut config = test_config();
        config.environment = "production".to_string();
        config.cors_origins = vec!["*".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_api_key() {
        let mut config = test_config();
        config.api_key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_backend_url() {
        let mut config = test_config();
        config.backend_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn is_production_matches_prod_aliases() {
        let mut config = test_config();
        config.environment = "PROD".to_string();
        assert!(config.is_production());
        config.environment = "staging".to_string();
        assert!(!config.is_production());
    }
}
