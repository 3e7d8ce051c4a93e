//! Conversation aggregate.
//!
//! A conversation belongs to exactly one user. This core only ever sets
//! the `Active` status; archival is handled outside the pipeline.

use crate::domain::foundation::{ConversationId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    /// Open for new messages.
    #[default]
    Active,
}

/// A conversation between one user and the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    user_id: UserId,
    status: ConversationStatus,
    created_at: Timestamp,
}

impl Conversation {
    /// Creates a new active conversation for a user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: ConversationId::new(),
            user_id,
            status: ConversationStatus::Active,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitutes a conversation from persistence.
    pub fn reconstitute(
        id: ConversationId,
        user_id: UserId,
        status: ConversationStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            status,
            created_at,
        }
    }

    /// Returns the conversation id.
    pub fn id(&self) -> ConversationId {
        self.id
    }

    /// Returns the owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    /// Returns when the conversation was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
