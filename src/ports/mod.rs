//! Ports layer - contracts for the external collaborators.
//!
//! The pipeline consumes a persistent document store, an identity-backed
//! account document, an inference endpoint, and a local fallback cache.
//! Adapters implement these traits; the application layer depends only on
//! the traits.

mod account_store;
mod conversation_store;
mod inference;
mod intake_cache;
mod profile_store;

pub use account_store::{Account, AccountStore};
pub use conversation_store::{ConversationStore, MessageSnapshots};
pub use inference::{InferenceClient, InferenceError, InferenceRequest, InferenceResponse};
pub use intake_cache::{CachedIntake, CacheError, IntakeFallbackCache};
pub use profile_store::IntakeProfileStore;
