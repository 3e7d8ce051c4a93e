//! Intake interview handler.
//!
//! Walks one user through the intake script, collecting answers into an
//! [`IntakeProfile`]. Completion persists the profile remotely; if that
//! write fails, the raw responses are parked in the local fallback cache
//! and the interview still reaches its terminal state. The cache is
//! replayed later by [`IntakeReconciler`].

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::intake::{
    IntakeCursor, IntakeProfile, IntakeResponse, IntakeScript, InterviewStatus, QuestionCategory,
};
use crate::ports::{AccountStore, CachedIntake, IntakeFallbackCache, IntakeProfileStore};

/// Errors surfaced by the intake interview.
#[derive(Debug, Clone, Error)]
pub enum IntakeError {
    /// The submitted answer was blank after trimming. Recovered locally;
    /// nothing is recorded.
    #[error("Validation error: answer cannot be empty")]
    EmptyAnswer,

    /// The interview already reached its terminal state.
    #[error("The interview is already complete")]
    AlreadyCompleted,
}

/// The question currently awaiting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    /// Step position in the script.
    pub step_index: usize,
    /// Question position within the step.
    pub question_index: usize,
    /// Step title shown as a section header.
    pub step_title: String,
    /// The question text.
    pub text: String,
    /// Category of the question.
    pub category: QuestionCategory,
}

/// Result of submitting one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// More questions remain; this is the next one.
    NextQuestion(PendingQuestion),
    /// The interview finished. `profile_persisted` is false when the
    /// remote write failed and the responses were parked in the local
    /// fallback cache instead.
    Completed { profile_persisted: bool },
}

/// Interview state for one user.
pub struct IntakeInterview {
    user_id: UserId,
    script: IntakeScript,
    cursor: IntakeCursor,
    status: InterviewStatus,
    profile: IntakeProfile,
    profiles: Arc<dyn IntakeProfileStore>,
    accounts: Arc<dyn AccountStore>,
    cache: Arc<dyn IntakeFallbackCache>,
}

impl IntakeInterview {
    /// Starts a fresh interview at the first question.
    pub fn new(
        user_id: UserId,
        script: IntakeScript,
        profiles: Arc<dyn IntakeProfileStore>,
        accounts: Arc<dyn AccountStore>,
        cache: Arc<dyn IntakeFallbackCache>,
    ) -> Self {
        let profile = IntakeProfile::new(user_id.clone());
        Self {
            user_id,
            script,
            cursor: IntakeCursor::start(),
            status: InterviewStatus::InProgress,
            profile,
            profiles,
            accounts,
            cache,
        }
    }

    /// Current interview status.
    pub fn status(&self) -> InterviewStatus {
        self.status
    }

    /// The question currently awaiting an answer, or `None` once the
    /// interview is complete.
    pub fn current_question(&self) -> Option<PendingQuestion> {
        if self.status == InterviewStatus::Completed {
            return None;
        }
        self.pending_at(self.cursor.step_index(), self.cursor.question_index())
    }

    /// Everything answered so far, in original script order. Rendered
    /// together with [`Self::current_question`] this is the full
    /// transcript view: no reordering, no skipped questions.
    pub fn answered(&self) -> &[IntakeResponse] {
        self.profile.responses()
    }

    /// Submits an answer for the current question and advances.
    ///
    /// Re-submitting a position (after an external rewind) overwrites the
    /// stored response without duplicating it.
    ///
    /// # Errors
    ///
    /// - [`IntakeError::EmptyAnswer`] if the text is blank after trimming
    /// - [`IntakeError::AlreadyCompleted`] once the interview is done
    pub async fn submit_answer(&mut self, text: &str) -> Result<SubmitOutcome, IntakeError> {
        if self.status == InterviewStatus::Completed {
            return Err(IntakeError::AlreadyCompleted);
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(IntakeError::EmptyAnswer);
        }

        let step_index = self.cursor.step_index();
        let question_index = self.cursor.question_index();
        // An empty script has no current question; treat it as done.
        let question = self
            .script
            .question_at(step_index, question_index)
            .ok_or(IntakeError::AlreadyCompleted)?;

        self.profile.record_response(IntakeResponse {
            step_index,
            question_index,
            question_text: question.text.clone(),
            category: question.category,
            response_text: trimmed.to_string(),
        });

        if self.cursor.advance(&self.script) == InterviewStatus::Completed {
            self.status = InterviewStatus::Completed;
            let persisted = self.persist_completion().await;
            return Ok(SubmitOutcome::Completed {
                profile_persisted: persisted,
            });
        }

        let next = self
            .pending_at(self.cursor.step_index(), self.cursor.question_index())
            .expect("advance landed on a valid question");
        Ok(SubmitOutcome::NextQuestion(next))
    }

    /// Persists the completed profile, falling back to the local cache on
    /// failure. The interview reaches its terminal state either way.
    async fn persist_completion(&mut self) -> bool {
        let completed_at = Timestamp::now();
        self.profile.complete(completed_at);

        let remote = async {
            self.profiles.save(&self.profile).await?;
            self.accounts.set_intake_completed(&self.user_id).await
        };

        match remote.await {
            Ok(()) => {
                tracing::info!(user_id = %self.user_id, "intake profile persisted");
                true
            }
            Err(err) => {
                tracing::warn!(
                    user_id = %self.user_id,
                    error = %err,
                    "intake profile write failed, parking responses in local cache"
                );
                let entry = CachedIntake {
                    user_id: self.user_id.clone(),
                    responses: self.profile.responses().to_vec(),
                    completed_at,
                };
                if let Err(cache_err) = self.cache.store(&entry).await {
                    // Nowhere left to park the data; the transcript only
                    // survives in memory until the session ends.
                    tracing::error!(
                        user_id = %self.user_id,
                        error = %cache_err,
                        "intake fallback cache write failed"
                    );
                }
                false
            }
        }
    }

    fn pending_at(&self, step_index: usize, question_index: usize) -> Option<PendingQuestion> {
        let step = self.script.steps().get(step_index)?;
        let question = step.questions.get(question_index)?;
        Some(PendingQuestion {
            step_index,
            question_index,
            step_title: step.title.clone(),
            text: question.text.clone(),
            category: question.category,
        })
    }
}

/// Result of a reconciliation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No cached completion was waiting.
    NothingPending,
    /// The cached completion was replayed and the cache entry cleared.
    Replayed,
    /// The remote write failed again; the cache entry stays queued.
    StillPending,
}

/// Replays cached intake completions into the remote store.
///
/// Run at session start so a profile split by a transient write failure
/// heals as soon as the store is reachable again.
pub struct IntakeReconciler {
    profiles: Arc<dyn IntakeProfileStore>,
    accounts: Arc<dyn AccountStore>,
    cache: Arc<dyn IntakeFallbackCache>,
}

impl IntakeReconciler {
    /// Creates a reconciler over the same collaborators as the interview.
    pub fn new(
        profiles: Arc<dyn IntakeProfileStore>,
        accounts: Arc<dyn AccountStore>,
        cache: Arc<dyn IntakeFallbackCache>,
    ) -> Self {
        Self {
            profiles,
            accounts,
            cache,
        }
    }

    /// Attempts to replay the cached completion for a user.
    pub async fn reconcile(&self, user_id: &UserId) -> ReconcileOutcome {
        let entry = match self.cache.load(user_id).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return ReconcileOutcome::NothingPending,
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "intake cache read failed");
                return ReconcileOutcome::StillPending;
            }
        };

        let mut profile = IntakeProfile::new(entry.user_id.clone());
        for response in &entry.responses {
            profile.record_response(response.clone());
        }
        profile.complete(entry.completed_at);

        let remote = async {
            self.profiles.save(&profile).await?;
            self.accounts.set_intake_completed(user_id).await
        };

        match remote.await {
            Ok(()) => {
                if let Err(err) = self.cache.remove(user_id).await {
                    tracing::warn!(user_id = %user_id, error = %err, "intake cache cleanup failed");
                }
                tracing::info!(user_id = %user_id, "cached intake completion replayed");
                ReconcileOutcome::Replayed
            }
            Err(err) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %err,
                    "intake replay failed, keeping cache entry"
                );
                ReconcileOutcome::StillPending
            }
        }
    }
}
