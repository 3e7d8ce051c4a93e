//! Conversation store port.
//!
//! Conversations are single documents; messages are an append-only
//! sub-collection ordered by timestamp. The store's real-time contract
//! delivers the full current message list on every change; the session
//! manager reduces those snapshots into an append-only feed.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, DomainError, UserId};

/// Stream of full message snapshots, ordered oldest-first, one item per
/// store change. The subscription ends when the stream is dropped.
pub type MessageSnapshots = Pin<Box<dyn Stream<Item = Vec<Message>> + Send>>;

/// Port for conversation and message persistence.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Persist a new conversation document.
    ///
    /// # Errors
    ///
    /// - `StorageError` on write failure
    async fn create(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Find the most recently created conversation for a user.
    ///
    /// Returns `None` if the user has no conversations yet.
    async fn find_latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Conversation>, DomainError>;

    /// Append a message to a conversation.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    /// - `StorageError` on write failure
    async fn append_message(
        &self,
        conversation_id: &ConversationId,
        message: &Message,
    ) -> Result<(), DomainError>;

    /// Read all messages of a conversation, ordered by creation time
    /// ascending.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    async fn messages(&self, conversation_id: &ConversationId)
        -> Result<Vec<Message>, DomainError>;

    /// Subscribe to message snapshots for a conversation.
    ///
    /// The first item is the current message list; every append delivers
    /// a fresh full snapshot.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    async fn subscribe(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<MessageSnapshots, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ConversationStore) {}
    }
}
