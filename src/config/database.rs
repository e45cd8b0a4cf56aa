use crate::core::{AppError, Result};
use serde::Deserialize;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    /// Deadline for individual payment-state operations; on expiry the
    /// operation fails closed with no status mutation.
    pub op_timeout_secs: u64,
}

fn env_parse<T: FromStr>(key: &str, default: &str) -> Result<T> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid {key}")))
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(DatabaseConfig {
            url: env::var("DATABASE_URL")
                .map_err(|_| AppError::Configuration("DATABASE_URL not set".to_string()))?,
            min_connections: env_parse("DATABASE_MIN_CONNECTIONS", "5")?,
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS", "20")?,
            op_timeout_secs: env_parse("DATABASE_OP_TIMEOUT_SECS", "5")?,
        })
    }

    pub fn op_timeout(&self) -> Duration {
        Duration::from_secs(self.op_timeout_secs)
    }

    /// Connect a MySQL pool. Connection acquisition is bounded by the
    /// same deadline as the operations it serves.
    pub async fn create_pool(&self) -> Result<MySqlPool> {
        MySqlPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(self.op_timeout())
            .test_before_acquire(true)
            .connect(&self.url)
            .await
            .map_err(AppError::Database)
    }
}
