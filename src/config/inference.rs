//! Inference endpoint configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Inference endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Endpoint URL the assembled context is POSTed to
    pub endpoint_url: String,

    /// API key sent as a bearer token
    pub api_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl InferenceConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate inference configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.endpoint_url.is_empty() {
            return Err(ValidationError::MissingRequired("INFERENCE__ENDPOINT_URL"));
        }
        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://") {
            return Err(ValidationError::InvalidEndpointUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}
