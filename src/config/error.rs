//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Capacity per date must be at least 1")]
    ZeroCapacity,

    #[error("Offer window for {channel} must be between 1 and {max} days")]
    InvalidOfferDays { channel: &'static str, max: u8 },

    #[error("UTC offset must be between -12 and +14 hours")]
    InvalidUtcOffset,

    #[error("Credential prefix must be non-empty alphanumeric")]
    InvalidCredentialPrefix,

    #[error("Broadcast concurrency must be at least 1")]
    InvalidBroadcastConcurrency,

    #[error("Webhook URL must use http or https")]
    InvalidWebhookUrl,
}
