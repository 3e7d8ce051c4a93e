//! Local intake fallback cache port.
//!
//! When the remote profile write fails at the end of the interview, the
//! raw response map is parked here, keyed by user id, so the interview
//! can still reach its terminal state. The cache doubles as the retry
//! queue: reconciliation replays the entry and removes it on success.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::intake::IntakeResponse;

/// A cached, not-yet-persisted intake completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedIntake {
    /// The user whose remote write failed.
    pub user_id: UserId,
    /// The flattened response list at completion time.
    pub responses: Vec<IntakeResponse>,
    /// When the interview completed.
    pub completed_at: Timestamp,
}

/// Errors from the local cache.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// The cache medium failed (disk, serialization).
    #[error("Intake cache I/O failed: {0}")]
    Io(String),

    /// A cached entry could not be decoded.
    #[error("Corrupt intake cache entry for user {user_id}: {reason}")]
    Corrupt { user_id: String, reason: String },
}

/// Port for the local-only intake fallback cache.
#[async_trait]
pub trait IntakeFallbackCache: Send + Sync {
    /// Store (or replace) the cached completion for a user.
    async fn store(&self, entry: &CachedIntake) -> Result<(), CacheError>;

    /// Load the cached completion for a user, if any.
    async fn load(&self, user_id: &UserId) -> Result<Option<CachedIntake>, CacheError>;

    /// Remove the cached completion for a user after a successful replay.
    async fn remove(&self, user_id: &UserId) -> Result<(), CacheError>;
}
