//! In-memory conversation store with snapshot fan-out.
//!
//! Mirrors the document-store subscription contract: every append
//! publishes the full ordered message list to all subscribers.

use async_trait::async_trait;
use futures::{future, stream, StreamExt};
use std::collections::HashMap;
use tokio::sync::{broadcast, RwLock};

use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, UserId};
use crate::ports::{ConversationStore, MessageSnapshots};

/// Snapshot buffer per subscriber; slow consumers skip to newer snapshots.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 32;

struct ConversationRecord {
    conversation: Conversation,
    messages: Vec<Message>,
    snapshots: broadcast::Sender<Vec<Message>>,
}

/// In-memory implementation of the [`ConversationStore`] port.
#[derive(Default)]
pub struct InMemoryConversationStore {
    records: RwLock<HashMap<ConversationId, ConversationRecord>>,
}

impl InMemoryConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(conversation_id: &ConversationId) -> DomainError {
        DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found")
            .with_detail("conversation_id", conversation_id.to_string())
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn create(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let (snapshots, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        self.records.write().await.insert(
            conversation.id(),
            ConversationRecord {
                conversation: conversation.clone(),
                messages: Vec::new(),
                snapshots,
            },
        );
        Ok(())
    }

    async fn find_latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Conversation>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.conversation.user_id() == user_id)
            .max_by_key(|r| r.conversation.created_at())
            .map(|r| r.conversation.clone()))
    }

    async fn append_message(
        &self,
        conversation_id: &ConversationId,
        message: &Message,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(conversation_id)
            .ok_or_else(|| Self::not_found(conversation_id))?;

        record.messages.push(message.clone());
        // No receivers is fine; the snapshot is simply dropped.
        let _ = record.snapshots.send(record.messages.clone());
        Ok(())
    }

    async fn messages(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, DomainError> {
        let records = self.records.read().await;
        records
            .get(conversation_id)
            .map(|r| r.messages.clone())
            .ok_or_else(|| Self::not_found(conversation_id))
    }

    async fn subscribe(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<MessageSnapshots, DomainError> {
        let records = self.records.read().await;
        let record = records
            .get(conversation_id)
            .ok_or_else(|| Self::not_found(conversation_id))?;

        let current = record.messages.clone();
        let rx = record.snapshots.subscribe();

        let updates = stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(snapshot) => return Some((snapshot, rx)),
                    // A lagged subscriber only cares about the newest
                    // snapshot anyway, so skip ahead.
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });

        Ok(Box::pin(stream::once(future::ready(current)).chain(updates)))
    }
}
