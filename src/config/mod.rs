//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `AMPARO` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use amparo_core::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod chat;
mod error;
mod inference;

pub use chat::ChatConfig;
pub use error::{ConfigError, ValidationError};
pub use inference::InferenceConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Inference endpoint configuration
    pub inference: InferenceConfig,

    /// Chat pipeline configuration (history window, quota ceiling,
    /// fallback cache location)
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `AMPARO` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `AMPARO__INFERENCE__ENDPOINT_URL=...` -> `inference.endpoint_url`
    /// - `AMPARO__CHAT__HISTORY_WINDOW=10` -> `chat.history_window`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AMPARO")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.inference.validate()?;
        self.chat.validate()?;
        Ok(())
    }
}
