//! Adapters layer - concrete implementations of the ports.

pub mod cache;
pub mod inference;
pub mod memory;

pub use cache::FileIntakeCache;
pub use inference::{HttpInferenceClient, HttpInferenceConfig, MockInferenceClient};
pub use memory::{InMemoryAccountStore, InMemoryConversationStore, InMemoryProfileStore};
