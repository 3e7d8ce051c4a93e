//! Intake module - the structured onboarding interview.
//!
//! A fixed script of categorized questions is walked strictly in order by
//! a cursor; answers accumulate into an [`IntakeProfile`] that is frozen
//! on completion.

mod cursor;
mod profile;
mod script;

pub use cursor::{IntakeCursor, InterviewStatus};
pub use profile::{IntakeProfile, IntakeResponse};
pub use script::{IntakeQuestion, IntakeScript, IntakeStep, QuestionCategory};
