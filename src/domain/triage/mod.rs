//! Triage module - content-safety checks on outgoing messages.
//!
//! Two independent, pure checks: risk-tier classification over curated
//! keyword tables, and contact-circumvention detection over phone/email
//! patterns. Neither calls out; both are deterministic.

mod contact;
mod keywords;
mod risk;

pub use contact::contains_circumvention_contact;
pub use risk::{classify_risk, RiskLevel};
