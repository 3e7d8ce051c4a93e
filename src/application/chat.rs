//! Chat session manager.
//!
//! Owns the lifecycle of one user's conversation and orchestrates the
//! pre-send checks around each outgoing message: contact-circumvention
//! rejection, quota gating, context assembly, the inference call, and the
//! append of both sides of the exchange.

use std::pin::Pin;
use std::sync::Arc;

use futures::{future, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::context::ContextAssembler;
use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, DomainError, StateMachine, Timestamp, UserId};
use crate::domain::quota::PlanLimits;
use crate::domain::triage::{classify_risk, contains_circumvention_contact, RiskLevel};
use crate::ports::{
    AccountStore, ConversationStore, InferenceClient, InferenceError, InferenceRequest,
    IntakeProfileStore, MessageSnapshots,
};

/// Lifecycle of a chat session.
///
/// One resolution per session: the session either picks up the user's
/// most recent conversation or creates the first one, then stays active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No conversation looked up yet.
    #[default]
    NoConversation,
    /// Lookup/creation in flight.
    Resolving,
    /// Conversation bound; messages can flow.
    Active,
}

impl StateMachine for SessionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionState::*;
        matches!(
            (self, target),
            (NoConversation, Resolving)
                | (Resolving, Active)
                // Lookup failed; allow a retry.
                | (Resolving, NoConversation)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionState::*;
        match self {
            NoConversation => vec![Resolving],
            Resolving => vec![Active, NoConversation],
            Active => vec![],
        }
    }
}

/// Errors surfaced by [`ChatSession::send_message`].
///
/// None of these are fatal; the UI converts each into a visible state
/// (policy notice, upgrade prompt, apology message).
#[derive(Debug, Clone, Error)]
pub enum SendError {
    /// Message was blank after trimming.
    #[error("Validation error: message cannot be empty")]
    EmptyMessage,

    /// The message carries a phone number or email address.
    #[error("Contact information is not allowed in messages")]
    ContactInfoRejected,

    /// The daily ceiling for the user's plan is exhausted; the UI shows
    /// the upgrade prompt.
    #[error("Daily message limit reached for the current plan")]
    QuotaExceeded,

    /// `send_message` was called before `resolve()`.
    #[error("No active conversation for this session")]
    NoActiveConversation,

    /// The inference endpoint failed; the user message and quota
    /// increment are not rolled back.
    #[error("Inference endpoint failed: {0}")]
    Inference(String),

    /// A store operation failed.
    #[error("Storage error: {0}")]
    Store(String),
}

impl From<DomainError> for SendError {
    fn from(err: DomainError) -> Self {
        SendError::Store(err.to_string())
    }
}

impl From<InferenceError> for SendError {
    fn from(err: InferenceError) -> Self {
        SendError::Inference(err.to_string())
    }
}

/// Result of an accepted, answered message.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    /// The stored user message.
    pub user_message: Message,
    /// The stored assistant reply.
    pub assistant_message: Message,
    /// Triage tier of the outgoing message, for the caller's safety
    /// handling. Classification never blocks the send.
    pub risk: RiskLevel,
}

/// Batches of newly appended messages, in order. The first batch is the
/// conversation so far.
pub type MessageFeed = Pin<Box<dyn Stream<Item = Vec<Message>> + Send>>;

/// One user's chat session.
pub struct ChatSession {
    user_id: UserId,
    state: SessionState,
    conversation_id: Option<ConversationId>,
    accounts: Arc<dyn AccountStore>,
    conversations: Arc<dyn ConversationStore>,
    profiles: Arc<dyn IntakeProfileStore>,
    inference: Arc<dyn InferenceClient>,
    assembler: ContextAssembler,
    free_daily_messages: u32,
}

impl ChatSession {
    /// Creates an unresolved session for a user.
    pub fn new(
        user_id: UserId,
        accounts: Arc<dyn AccountStore>,
        conversations: Arc<dyn ConversationStore>,
        profiles: Arc<dyn IntakeProfileStore>,
        inference: Arc<dyn InferenceClient>,
        assembler: ContextAssembler,
        free_daily_messages: u32,
    ) -> Self {
        Self {
            user_id,
            state: SessionState::NoConversation,
            conversation_id: None,
            accounts,
            conversations,
            profiles,
            inference,
            assembler,
            free_daily_messages,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The bound conversation, once resolved.
    pub fn conversation_id(&self) -> Option<ConversationId> {
        self.conversation_id
    }

    /// Binds the session to the user's most recent conversation, creating
    /// one if none exists. Idempotent: an active session returns its
    /// bound id without touching the store again.
    pub async fn resolve(&mut self) -> Result<ConversationId, DomainError> {
        if let (SessionState::Active, Some(id)) = (self.state, self.conversation_id) {
            return Ok(id);
        }

        self.state = self
            .state
            .transition_to(SessionState::Resolving)
            .map_err(DomainError::from)?;

        let resolved = match self.lookup_or_create().await {
            Ok(id) => id,
            Err(err) => {
                // Back to the start so the caller can retry.
                self.state = SessionState::NoConversation;
                return Err(err);
            }
        };

        self.conversation_id = Some(resolved);
        self.state = SessionState::Active;
        Ok(resolved)
    }

    async fn lookup_or_create(&self) -> Result<ConversationId, DomainError> {
        if let Some(existing) = self.conversations.find_latest_for_user(&self.user_id).await? {
            tracing::debug!(
                user_id = %self.user_id,
                conversation_id = %existing.id(),
                "resumed existing conversation"
            );
            return Ok(existing.id());
        }

        let conversation = Conversation::new(self.user_id.clone());
        self.conversations.create(&conversation).await?;
        tracing::info!(
            user_id = %self.user_id,
            conversation_id = %conversation.id(),
            "created first conversation"
        );
        Ok(conversation.id())
    }

    /// Sends one user message through the pipeline.
    ///
    /// Order of checks: circumvention contact, then quota, then the
    /// message is accepted (appended and counted), then context assembly
    /// and the inference call. An inference failure surfaces as an error
    /// without rolling back the accepted message or the quota increment.
    pub async fn send_message(&mut self, text: &str) -> Result<SendOutcome, SendError> {
        let conversation_id = match (self.state, self.conversation_id) {
            (SessionState::Active, Some(id)) => id,
            _ => return Err(SendError::NoActiveConversation),
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SendError::EmptyMessage);
        }

        // Policy check first: contact info never reaches the quota gate
        // or the endpoint.
        if contains_circumvention_contact(trimmed) {
            tracing::info!(user_id = %self.user_id, "message rejected: contact info");
            return Err(SendError::ContactInfoRejected);
        }

        let account = self.accounts.fetch(&self.user_id).await?;
        let limits =
            PlanLimits::for_tier_with_ceiling(account.plan_tier, self.free_daily_messages);

        let mut usage = account.usage;
        if usage.rollover(Timestamp::now()) {
            tracing::debug!(user_id = %self.user_id, "usage counter rolled over to a new day");
        }
        if !usage.can_send(&limits) {
            tracing::info!(
                user_id = %self.user_id,
                tier = %account.plan_tier,
                "message blocked: daily quota exhausted"
            );
            return Err(SendError::QuotaExceeded);
        }

        let risk = classify_risk(trimmed);

        // History is captured before the append so the outgoing message
        // appears only once in the payload.
        let history = self.conversations.messages(&conversation_id).await?;

        // The message is accepted: append and count it. From here on
        // nothing is rolled back.
        let user_message = Message::user(trimmed)?;
        self.conversations
            .append_message(&conversation_id, &user_message)
            .await?;

        usage.record_interaction();
        self.accounts.update_usage(&self.user_id, &usage).await?;

        let profile = match self.profiles.find_by_user(&self.user_id).await {
            Ok(profile) => profile,
            Err(err) => {
                // A missing profile degrades the context, not the send.
                tracing::warn!(user_id = %self.user_id, error = %err, "profile read failed");
                None
            }
        };

        let payload = self
            .assembler
            .build(profile.as_ref(), &history, trimmed);

        let generated = match self.inference.generate(InferenceRequest::new(payload)).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    user_id = %self.user_id,
                    conversation_id = %conversation_id,
                    error = %err,
                    "inference call failed"
                );
                return Err(err.into());
            }
        };

        let assistant_message = Message::assistant(generated.response)?;
        self.conversations
            .append_message(&conversation_id, &assistant_message)
            .await?;

        Ok(SendOutcome {
            user_message,
            assistant_message,
            risk,
        })
    }

    /// The real-time message feed for the bound conversation.
    ///
    /// The store's full-snapshot subscription is reduced to batches of
    /// newly appended messages; the first batch is the history so far.
    /// Dropping the feed ends the subscription (session teardown).
    pub async fn updates(&self) -> Result<MessageFeed, SendError> {
        let conversation_id = match (self.state, self.conversation_id) {
            (SessionState::Active, Some(id)) => id,
            _ => return Err(SendError::NoActiveConversation),
        };

        let snapshots = self.conversations.subscribe(&conversation_id).await?;
        Ok(reduce_to_appended(snapshots))
    }
}

/// Reduces full snapshots into batches of messages not seen before.
///
/// The store re-delivers the whole list on every change; tracking the
/// seen count avoids re-deriving the UI list from scratch per append.
fn reduce_to_appended(snapshots: MessageSnapshots) -> MessageFeed {
    Box::pin(
        snapshots
            .scan(0usize, |seen, snapshot| {
                let batch: Vec<Message> = snapshot.get(*seen..).unwrap_or_default().to_vec();
                *seen = snapshot.len().max(*seen);
                future::ready(Some(batch))
            })
            .filter(|batch| future::ready(!batch.is_empty())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryAccountStore, InMemoryConversationStore, InMemoryProfileStore,
        MockInferenceClient,
    };
    use crate::domain::quota::{PlanTier, UsageCounter};
    use crate::ports::Account;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    struct Fixture {
        accounts: Arc<InMemoryAccountStore>,
        conversations: Arc<InMemoryConversationStore>,
        profiles: Arc<InMemoryProfileStore>,
        inference: Arc<MockInferenceClient>,
    }

    async fn fixture_with(account: Account) -> Fixture {
        let accounts = Arc::new(InMemoryAccountStore::new());
        accounts.insert(account).await;
        Fixture {
            accounts,
            conversations: Arc::new(InMemoryConversationStore::new()),
            profiles: Arc::new(InMemoryProfileStore::new()),
            inference: Arc::new(MockInferenceClient::new()),
        }
    }

    fn session(f: &Fixture) -> ChatSession {
        ChatSession::new(
            user(),
            f.accounts.clone(),
            f.conversations.clone(),
            f.profiles.clone(),
            f.inference.clone(),
            ContextAssembler::new(10),
            15,
        )
    }

    #[tokio::test]
    async fn resolve_creates_conversation_when_none_exists() {
        let f = fixture_with(Account::new(user())).await;
        let mut session = session(&f);
        assert_eq!(session.state(), SessionState::NoConversation);

        let id = session.resolve().await.unwrap();
        assert_eq!(session.state(), SessionState::Active);

        // Idempotent: same id, no second conversation.
        assert_eq!(session.resolve().await.unwrap(), id);
        let latest = f.conversations.find_latest_for_user(&user()).await.unwrap();
        assert_eq!(latest.map(|c| c.id()), Some(id));
    }

    #[tokio::test]
    async fn resolve_reuses_most_recent_conversation() {
        let f = fixture_with(Account::new(user())).await;
        let existing = Conversation::new(user());
        f.conversations.create(&existing).await.unwrap();

        let mut session = session(&f);
        assert_eq!(session.resolve().await.unwrap(), existing.id());
    }

    #[tokio::test]
    async fn send_before_resolve_is_rejected() {
        let f = fixture_with(Account::new(user())).await;
        let mut session = session(&f);
        assert!(matches!(
            session.send_message("oi").await,
            Err(SendError::NoActiveConversation)
        ));
    }

    #[tokio::test]
    async fn accepted_message_appends_both_sides_and_counts() {
        let f = fixture_with(Account::new(user())).await;
        let mut session = session(&f);
        let id = session.resolve().await.unwrap();

        let outcome = session.send_message("oi").await.unwrap();
        assert_eq!(outcome.risk, RiskLevel::Low);

        let messages = f.conversations.messages(&id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content(), "oi");

        let account = f.accounts.fetch(&user()).await.unwrap();
        assert_eq!(account.usage.daily_interactions(), 1);
        assert_eq!(f.inference.call_count(), 1);
    }

    #[tokio::test]
    async fn contact_info_is_rejected_before_any_effect() {
        let f = fixture_with(Account::new(user())).await;
        let mut session = session(&f);
        let id = session.resolve().await.unwrap();

        let err = session
            .send_message("fale comigo no 11987654321")
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::ContactInfoRejected));

        assert!(f.conversations.messages(&id).await.unwrap().is_empty());
        assert_eq!(f.accounts.fetch(&user()).await.unwrap().usage.daily_interactions(), 0);
        assert_eq!(f.inference.call_count(), 0);
    }

    #[tokio::test]
    async fn exhausted_free_quota_blocks_before_any_effect() {
        let mut account = Account::new(user());
        let mut usage = UsageCounter::new();
        usage.rollover(Timestamp::now());
        for _ in 0..15 {
            usage.record_interaction();
        }
        account.usage = usage;
        let f = fixture_with(account).await;

        let mut session = session(&f);
        let id = session.resolve().await.unwrap();

        let err = session.send_message("oi").await.unwrap_err();
        assert!(matches!(err, SendError::QuotaExceeded));
        assert!(f.conversations.messages(&id).await.unwrap().is_empty());
        assert_eq!(f.inference.call_count(), 0);
    }

    #[tokio::test]
    async fn premium_tier_is_never_quota_blocked() {
        let mut account = Account::new(user());
        account.plan_tier = PlanTier::Premium;
        let mut usage = UsageCounter::new();
        usage.rollover(Timestamp::now());
        for _ in 0..500 {
            usage.record_interaction();
        }
        account.usage = usage;
        let f = fixture_with(account).await;

        let mut session = session(&f);
        session.resolve().await.unwrap();
        assert!(session.send_message("oi").await.is_ok());
    }

    #[tokio::test]
    async fn stale_counter_rolls_over_on_new_day() {
        let mut account = Account::new(user());
        account.usage =
            UsageCounter::reconstitute(15, Some(Timestamp::now().minus_days(1).date()));
        let f = fixture_with(account).await;

        let mut session = session(&f);
        session.resolve().await.unwrap();

        assert!(session.send_message("oi").await.is_ok());
        let stored = f.accounts.fetch(&user()).await.unwrap();
        assert_eq!(stored.usage.daily_interactions(), 1);
    }

    #[tokio::test]
    async fn inference_failure_keeps_user_message_and_increment() {
        let f = fixture_with(Account::new(user())).await;
        let inference = Arc::new(
            MockInferenceClient::new().with_error(InferenceError::Unreachable("down".into())),
        );
        let mut session = ChatSession::new(
            user(),
            f.accounts.clone(),
            f.conversations.clone(),
            f.profiles.clone(),
            inference,
            ContextAssembler::new(10),
            15,
        );
        let id = session.resolve().await.unwrap();

        let err = session.send_message("oi").await.unwrap_err();
        assert!(matches!(err, SendError::Inference(_)));

        // User message stays, no assistant message, quota spent.
        let messages = f.conversations.messages(&id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(f.accounts.fetch(&user()).await.unwrap().usage.daily_interactions(), 1);
    }

    #[tokio::test]
    async fn risk_tier_is_surfaced_on_outcome() {
        let f = fixture_with(Account::new(user())).await;
        let mut session = session(&f);
        session.resolve().await.unwrap();

        let outcome = session
            .send_message("tenho sentido muita ansiedade")
            .await
            .unwrap();
        assert_eq!(outcome.risk, RiskLevel::Moderate);
    }

    #[tokio::test]
    async fn updates_feed_delivers_history_then_appends() {
        let f = fixture_with(Account::new(user())).await;
        let mut session = session(&f);
        session.resolve().await.unwrap();

        session.send_message("primeira").await.unwrap();
        let mut feed = session.updates().await.unwrap();

        let history = feed.next().await.unwrap();
        assert_eq!(history.len(), 2);

        session.send_message("segunda").await.unwrap();
        let batch = feed.next().await.unwrap();
        assert_eq!(batch[0].content(), "segunda");
        let batch = feed.next().await.unwrap();
        assert_eq!(batch.len(), 1); // assistant reply
    }
}
