//! Plan tier definitions and their interaction limits.

use serde::{Deserialize, Serialize};

/// Default daily message ceiling for the free tier.
pub const DEFAULT_FREE_DAILY_MESSAGES: u32 = 15;

/// Subscription tier of a user account.
///
/// Read from the account document; this core never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Free tier - small fixed daily message ceiling.
    #[default]
    Free,
    /// Paid subscription - no daily ceiling.
    Premium,
    /// Administrative override - no daily ceiling.
    Staff,
}

impl PlanTier {
    /// Returns true for any tier above the base free tier.
    pub fn is_unlimited(&self) -> bool {
        !matches!(self, PlanTier::Free)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free",
            PlanTier::Premium => "Premium",
            PlanTier::Staff => "Staff",
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Interaction limits for a plan tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    /// The tier these limits apply to.
    pub tier: PlanTier,
    /// Maximum user messages per day. None = unlimited.
    pub max_daily_messages: Option<u32>,
}

impl PlanLimits {
    /// Get the limits for a tier with the default free ceiling.
    pub fn for_tier(tier: PlanTier) -> Self {
        Self::for_tier_with_ceiling(tier, DEFAULT_FREE_DAILY_MESSAGES)
    }

    /// Get the limits for a tier with a configured free-tier ceiling.
    pub fn for_tier_with_ceiling(tier: PlanTier, free_daily_messages: u32) -> Self {
        let max_daily_messages = match tier {
            PlanTier::Free => Some(free_daily_messages),
            PlanTier::Premium | PlanTier::Staff => None,
        };
        Self {
            tier,
            max_daily_messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_tier_has_fixed_ceiling() {
        let limits = PlanLimits::for_tier(PlanTier::Free);
        assert_eq!(limits.max_daily_messages, Some(DEFAULT_FREE_DAILY_MESSAGES));
    }

    #[test]
    fn premium_tier_is_unlimited() {
        let limits = PlanLimits::for_tier(PlanTier::Premium);
        assert_eq!(limits.max_daily_messages, None);
        assert!(PlanTier::Premium.is_unlimited());
    }

    #[test]
    fn staff_override_is_unlimited() {
        let limits = PlanLimits::for_tier(PlanTier::Staff);
        assert_eq!(limits.max_daily_messages, None);
    }

    #[test]
    fn free_ceiling_is_configurable() {
        let limits = PlanLimits::for_tier_with_ceiling(PlanTier::Free, 3);
        assert_eq!(limits.max_daily_messages, Some(3));
    }

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PlanTier::Premium).unwrap(), "\"premium\"");
        let tier: PlanTier = serde_json::from_str("\"staff\"").unwrap();
        assert_eq!(tier, PlanTier::Staff);
    }
}
