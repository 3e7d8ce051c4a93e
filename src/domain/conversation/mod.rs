//! Conversation module - the ongoing exchange between a user and the assistant.

mod conversation;
mod message;

pub use conversation::{Conversation, ConversationStatus};
pub use message::{Message, MessageId, Role};
