//! Mock inference client for testing.
//!
//! Configurable to replay scripted responses or inject errors, with call
//! capture for verification. Tests run without a live endpoint.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{InferenceClient, InferenceError, InferenceRequest, InferenceResponse};

/// Canned reply returned when no scripted response is queued.
const DEFAULT_REPLY: &str = "Estou aqui com você. Pode me contar mais?";

/// Mock implementation of the [`InferenceClient`] port.
///
/// Scripted outcomes are consumed in order; once the queue is empty every
/// call succeeds with a canned reply.
#[derive(Debug, Clone, Default)]
pub struct MockInferenceClient {
    scripted: Arc<Mutex<VecDeque<Result<String, InferenceError>>>>,
    calls: Arc<Mutex<Vec<InferenceRequest>>>,
}

impl MockInferenceClient {
    /// Creates a mock that always succeeds with the canned reply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.scripted.lock().unwrap().push_back(Ok(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: InferenceError) -> Self {
        self.scripted.lock().unwrap().push_back(Err(error));
        self
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<InferenceRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        self.calls.lock().unwrap().push(request);

        match self.scripted.lock().unwrap().pop_front() {
            Some(Ok(content)) => Ok(InferenceResponse { response: content }),
            Some(Err(error)) => Err(error),
            None => Ok(InferenceResponse {
                response: DEFAULT_REPLY.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::ContextAssembler;

    fn request(message: &str) -> InferenceRequest {
        InferenceRequest::new(ContextAssembler::new(5).build(None, &[], message))
    }

    #[tokio::test]
    async fn scripted_responses_replay_in_order() {
        let client = MockInferenceClient::new()
            .with_response("primeira")
            .with_response("segunda");

        assert_eq!(client.generate(request("a")).await.unwrap().response, "primeira");
        assert_eq!(client.generate(request("b")).await.unwrap().response, "segunda");
        // Queue exhausted: canned reply.
        assert_eq!(client.generate(request("c")).await.unwrap().response, DEFAULT_REPLY);
    }

    #[tokio::test]
    async fn scripted_error_is_returned() {
        let client = MockInferenceClient::new()
            .with_error(InferenceError::Unreachable("down".into()));

        assert!(client.generate(request("a")).await.is_err());
    }

    #[tokio::test]
    async fn calls_are_captured() {
        let client = MockInferenceClient::new();
        client.generate(request("olá")).await.unwrap();

        assert_eq!(client.call_count(), 1);
        assert_eq!(client.calls()[0].context.message, "olá");
    }
}
