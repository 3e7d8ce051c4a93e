//! Inference endpoint adapters.

mod http;
mod mock;

pub use http::{HttpInferenceClient, HttpInferenceConfig};
pub use mock::MockInferenceClient;
