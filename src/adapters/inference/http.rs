//! HTTP inference client.
//!
//! POSTs the assembled context as JSON to the configured endpoint and
//! decodes `{ "response": "..." }`. Single attempt per call: failures
//! surface directly, with no retry or backoff, matching the pipeline's
//! error contract.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::config::InferenceConfig;
use crate::ports::{InferenceClient, InferenceError, InferenceRequest, InferenceResponse};

/// Configuration for the HTTP inference client.
#[derive(Debug, Clone)]
pub struct HttpInferenceConfig {
    /// Endpoint URL the context payload is POSTed to.
    pub endpoint_url: String,
    /// API key sent as a bearer token, if the endpoint requires one.
    api_key: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpInferenceConfig {
    /// Creates a configuration for the given endpoint.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&InferenceConfig> for HttpInferenceConfig {
    fn from(config: &InferenceConfig) -> Self {
        Self {
            endpoint_url: config.endpoint_url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout(),
        }
    }
}

/// HTTP implementation of the [`InferenceClient`] port.
pub struct HttpInferenceClient {
    config: HttpInferenceConfig,
    client: Client,
}

impl HttpInferenceClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `Unreachable` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: HttpInferenceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InferenceError::Unreachable(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let mut http_request = self.client.post(&self.config.endpoint_url).json(&request);

        if let Some(key) = &self.config.api_key {
            http_request = http_request.bearer_auth(key.expose_secret());
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| InferenceError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InferenceError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<InferenceResponse>()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))
    }
}
