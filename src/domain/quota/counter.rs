//! Daily interaction counter.
//!
//! Fixed-window counter keyed by UTC calendar date. The counter lives in
//! the user's account document; the session manager rolls it over and
//! checks it before every accepted message. Check and increment are two
//! separate store writes with no transaction around them - a concurrent
//! send from the same user can slip past the ceiling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PlanLimits;
use crate::domain::foundation::Timestamp;

/// Per-day interaction counter for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UsageCounter {
    /// Accepted user messages in the current window.
    daily_interactions: u32,
    /// UTC date the current window belongs to.
    window_date: Option<NaiveDate>,
}

impl UsageCounter {
    /// Creates a zeroed counter with no window yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstitutes a counter from persistence.
    pub fn reconstitute(daily_interactions: u32, window_date: Option<NaiveDate>) -> Self {
        Self {
            daily_interactions,
            window_date,
        }
    }

    /// Accepted interactions in the current window.
    pub fn daily_interactions(&self) -> u32 {
        self.daily_interactions
    }

    /// The UTC date of the current window.
    pub fn window_date(&self) -> Option<NaiveDate> {
        self.window_date
    }

    /// Resets the counter if `now` falls on a later UTC date than the
    /// current window. Called before every quota check; the counter is
    /// corrected lazily at the next send attempt, never by a background
    /// job. Returns true if a reset happened.
    pub fn rollover(&mut self, now: Timestamp) -> bool {
        let today = now.date();
        match self.window_date {
            Some(date) if date == today => false,
            _ => {
                self.daily_interactions = 0;
                self.window_date = Some(today);
                true
            }
        }
    }

    /// Whether another message fits under the tier's ceiling.
    ///
    /// Always true for unlimited tiers.
    pub fn can_send(&self, limits: &PlanLimits) -> bool {
        match limits.max_daily_messages {
            Some(max) => self.daily_interactions < max,
            None => true,
        }
    }

    /// Counts one accepted message.
    pub fn record_interaction(&mut self) {
        self.daily_interactions += 1;
    }
}
