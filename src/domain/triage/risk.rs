//! Risk-tier classification for outgoing messages.

use serde::{Deserialize, Serialize};

use super::keywords::{DISTRESS_KEYWORDS, HIGH_RISK_KEYWORDS};

/// Triage tier assigned to an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Acute self-harm indicators present.
    High,
    /// Distress indicators present, no acute indicators.
    Moderate,
    /// No indicators from either table.
    Low,
}

/// Classifies a message into a risk tier.
///
/// Case-insensitive substring match against the keyword tables. The
/// high-risk table is checked first, so a message matching both tables
/// classifies as `High`.
pub fn classify_risk(message: &str) -> RiskLevel {
    let lowered = message.to_lowercase();

    if HIGH_RISK_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return RiskLevel::High;
    }
    if DISTRESS_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return RiskLevel::Moderate;
    }
    RiskLevel::Low
}
