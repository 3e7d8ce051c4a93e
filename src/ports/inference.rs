//! Inference client port.
//!
//! A single remote call accepting the assembled context and returning the
//! generated response. The endpoint exposes no structured error contract;
//! failures surface as opaque errors and are not retried here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::context::ContextPayload;

/// Request body for the inference endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceRequest {
    /// The assembled context: profile fields, bounded history, and the
    /// new outgoing message.
    #[serde(flatten)]
    pub context: ContextPayload,
}

impl InferenceRequest {
    /// Wraps an assembled payload.
    pub fn new(context: ContextPayload) -> Self {
        Self { context }
    }
}

/// Response body from the inference endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceResponse {
    /// The generated assistant reply.
    pub response: String,
}

/// Errors from the inference endpoint.
///
/// The remote contract has no error codes, so everything beyond transport
/// shape collapses into a message string.
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    /// The endpoint could not be reached or timed out.
    #[error("Inference endpoint unreachable: {0}")]
    Unreachable(String),

    /// The endpoint answered with a non-success status.
    #[error("Inference endpoint returned status {status}: {message}")]
    Endpoint { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Invalid inference response: {0}")]
    InvalidResponse(String),
}

/// Port for the remote inference endpoint.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Generate a response for the assembled context.
    ///
    /// Single attempt; callers surface failures directly without retry
    /// or backoff.
    async fn generate(&self, request: InferenceRequest)
        -> Result<InferenceResponse, InferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::{ContextAssembler, ContextPayload};

    #[test]
    fn inference_client_is_object_safe() {
        fn _accepts_dyn(_client: &dyn InferenceClient) {}
    }

    #[test]
    fn request_flattens_context_fields() {
        let payload: ContextPayload = ContextAssembler::new(5).build(None, &[], "oi");
        let json = serde_json::to_value(InferenceRequest::new(payload)).unwrap();

        assert_eq!(json["message"], "oi");
        assert!(json.get("history").is_some());
        assert!(json.get("context").is_none());
    }
}
