//! Configuration module
//!
//! Loads configuration from environment variables. Everything has a
//! default; the service runs with no environment at all.

use std::env;
use std::time::Duration;

use crate::service::{Backoff, RetryPolicy};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Wall-clock budget for one transfer, including retries
    pub transfer_deadline_ms: u64,

    /// Hard cap on commit attempts per transfer
    pub transfer_max_attempts: u32,

    /// Fixed part of the backoff between conflicting attempts
    pub transfer_backoff_micros: u64,

    /// Random part of the backoff
    pub transfer_jitter_micros: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let transfer_deadline_ms = env::var("TRANSFER_DEADLINE_MS")
            .unwrap_or_else(|_| "2000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("TRANSFER_DEADLINE_MS"))?;

        let transfer_max_attempts = env::var("TRANSFER_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "10000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("TRANSFER_MAX_ATTEMPTS"))?;

        let transfer_backoff_micros = env::var("TRANSFER_BACKOFF_MICROS")
            .unwrap_or_else(|_| "50".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("TRANSFER_BACKOFF_MICROS"))?;

        let transfer_jitter_micros = env::var("TRANSFER_JITTER_MICROS")
            .unwrap_or_else(|_| "200".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("TRANSFER_JITTER_MICROS"))?;

        Ok(Self {
            host,
            port,
            transfer_deadline_ms,
            transfer_max_attempts,
            transfer_backoff_micros,
            transfer_jitter_micros,
        })
    }

    /// The retry budget handed to the account service.
    pub fn transfer_retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.transfer_max_attempts,
            deadline: Duration::from_millis(self.transfer_deadline_ms),
            backoff: Backoff {
                base: Duration::from_micros(self.transfer_backoff_micros),
                jitter: Duration::from_micros(self.transfer_jitter_micros),
            },
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
