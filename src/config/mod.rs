use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub ozow: OzowConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Public base URL of the marketplace, used to derive the four
    /// redirect/notify URLs sent to the gateway.
    pub base_url: String,
}

/// Ozow gateway credentials and wire constants
#[derive(Debug, Clone, Deserialize)]
pub struct OzowConfig {
    pub site_code: String,
    /// Shared signing secret appended to every hash input.
    pub private_key: String,
    /// Gateway endpoint the checkout redirect points at.
    pub post_url: String,
    pub country_code: String,
    pub currency_code: String,
    pub is_test: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                base_url: env::var("APP_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            ozow: OzowConfig {
                site_code: env::var("OZOW_SITE_CODE")
                    .map_err(|_| AppError::Configuration("OZOW_SITE_CODE not set".to_string()))?,
                private_key: env::var("OZOW_PRIVATE_KEY")
                    .map_err(|_| AppError::Configuration("OZOW_PRIVATE_KEY not set".to_string()))?,
                post_url: env::var("OZOW_POST_URL").unwrap_or_else(|_| {
                    "https://stagingapi.ozow.com/PostPaymentRequest".to_string()
                }),
                country_code: env::var("OZOW_COUNTRY_CODE").unwrap_or_else(|_| "ZA".to_string()),
                currency_code: env::var("OZOW_CURRENCY_CODE")
                    .unwrap_or_else(|_| "ZAR".to_string()),
                is_test: env::var("OZOW_IS_TEST")
                    .map(|v| v == "true")
                    .unwrap_or(false),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    ///
    /// An unset signing secret must abort startup: without it the webhook
    /// verifier would reject everything while outbound requests carried
    /// forgeable hashes.
    pub fn validate(&self) -> Result<()> {
        if self.ozow.private_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "OZOW_PRIVATE_KEY must not be empty".to_string(),
            ));
        }

        if self.ozow.site_code.trim().is_empty() {
            return Err(AppError::Configuration(
                "OZOW_SITE_CODE must not be empty".to_string(),
            ));
        }

        url::Url::parse(&self.ozow.post_url).map_err(|e| {
            AppError::Configuration(format!("OZOW_POST_URL is not a valid URL: {}", e))
        })?;

        url::Url::parse(&self.app.base_url).map_err(|e| {
            AppError::Configuration(format!("APP_BASE_URL is not a valid URL: {}", e))
        })?;

        Ok(())
    }
}
