//! Interview cursor - position tracking over the intake script.
//!
//! The cursor walks the script strictly in order: next question within
//! the step, then the next step, then the terminal state. It never skips
//! and never revisits.

use serde::{Deserialize, Serialize};

use super::IntakeScript;
use crate::domain::foundation::StateMachine;

/// Lifecycle status of an intake interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    /// Questions remain to be answered.
    #[default]
    InProgress,
    /// Every question of every step has been answered.
    Completed,
}

impl StateMachine for InterviewStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (InterviewStatus::InProgress, InterviewStatus::Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            InterviewStatus::InProgress => vec![InterviewStatus::Completed],
            InterviewStatus::Completed => vec![],
        }
    }
}

/// Position within the intake script.
///
/// Starts at `(0, 0)`. [`IntakeCursor::advance`] is the only mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IntakeCursor {
    step_index: usize,
    question_index: usize,
}

impl IntakeCursor {
    /// Creates a cursor at the first question of the first step.
    pub fn start() -> Self {
        Self::default()
    }

    /// Returns the current step index.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Returns the current question index within the step.
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    /// Moves to the next question in script order.
    ///
    /// Increments the question index while the current step has questions
    /// left, then moves to the first question of the next step, and
    /// returns `Completed` once the last question of the last step has
    /// been passed. The cursor stays on the final position after that.
    pub fn advance(&mut self, script: &IntakeScript) -> InterviewStatus {
        let steps = script.steps();

        let within_step = steps
            .get(self.step_index)
            .map(|step| self.question_index + 1 < step.questions.len())
            .unwrap_or(false);

        if within_step {
            self.question_index += 1;
            return InterviewStatus::InProgress;
        }

        if self.step_index + 1 < steps.len() {
            self.step_index += 1;
            self.question_index = 0;
            return InterviewStatus::InProgress;
        }

        InterviewStatus::Completed
    }
}
