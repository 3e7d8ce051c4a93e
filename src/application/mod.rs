//! Application layer - orchestration over the domain and ports.
//!
//! Two handlers own the pipeline: [`intake::IntakeInterview`] walks the
//! onboarding interview, and [`chat::ChatSession`] runs the ongoing
//! conversation. Both take their collaborators as `Arc<dyn Port>` so
//! tests can inject fakes.

pub mod chat;
pub mod intake;

pub use chat::{ChatSession, SendError, SendOutcome, SessionState};
pub use intake::{
    IntakeError, IntakeInterview, IntakeReconciler, PendingQuestion, ReconcileOutcome,
    SubmitOutcome,
};
