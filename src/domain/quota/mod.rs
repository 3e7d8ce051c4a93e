//! Quota module - per-day interaction ceilings by plan tier.

mod counter;
mod plan;

pub use counter::UsageCounter;
pub use plan::{PlanLimits, PlanTier, DEFAULT_FREE_DAILY_MESSAGES};
