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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Inference endpoint URL must start with http:// or https://")]
    InvalidEndpointUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("History window must be at least 1")]
    InvalidHistoryWindow,

    #[error("Free-tier daily message ceiling must be at least 1")]
    InvalidDailyCeiling,
}
