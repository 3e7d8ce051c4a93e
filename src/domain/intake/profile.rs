//! Intake profile aggregate.
//!
//! One profile per user, built up answer by answer during the interview
//! and frozen once complete. Responses are keyed by `(step, question)`
//! position; re-submitting the same position overwrites in place.

use serde::{Deserialize, Serialize};

use super::QuestionCategory;
use crate::domain::foundation::{Timestamp, UserId};

/// A single answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeResponse {
    /// Step position in the script.
    pub step_index: usize,
    /// Question position within the step.
    pub question_index: usize,
    /// The question as it was asked.
    pub question_text: String,
    /// Category of the question.
    pub category: QuestionCategory,
    /// The user's answer, trimmed.
    pub response_text: String,
}

/// The profile record produced by the intake interview.
///
/// # Invariants
///
/// - `responses` is ordered by `(step_index, question_index)` ascending
/// - at most one response per position
/// - once `completed` is true the record is never mutated by this core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeProfile {
    user_id: UserId,
    responses: Vec<IntakeResponse>,
    completed: bool,
    completed_at: Option<Timestamp>,
    /// Flag consumed by downstream analysis, never set by this core.
    analyzed: bool,
}

impl IntakeProfile {
    /// Creates an empty, in-progress profile for a user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            responses: Vec::new(),
            completed: false,
            completed_at: None,
            analyzed: false,
        }
    }

    /// Records an answer, overwriting any previous answer at the same
    /// `(step, question)` position.
    pub fn record_response(&mut self, response: IntakeResponse) {
        let key = (response.step_index, response.question_index);
        match self
            .responses
            .binary_search_by_key(&key, |r| (r.step_index, r.question_index))
        {
            Ok(pos) => self.responses[pos] = response,
            Err(pos) => self.responses.insert(pos, response),
        }
    }

    /// Marks the profile complete and stamps the completion time.
    pub fn complete(&mut self, at: Timestamp) {
        self.completed = true;
        self.completed_at = Some(at);
    }

    /// Returns the owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The flattened, ordered list of answered questions.
    pub fn responses(&self) -> &[IntakeResponse] {
        &self.responses
    }

    /// Whether the interview finished.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// When the interview finished, if it did.
    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Whether downstream analysis has processed this profile.
    pub fn is_analyzed(&self) -> bool {
        self.analyzed
    }
}
