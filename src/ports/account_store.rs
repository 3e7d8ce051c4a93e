//! Account store port.
//!
//! The account document is owned by the identity/profile integration;
//! this core reads the plan tier as input, maintains the usage counter,
//! and flips the intake-completed flag once. Everything else in the
//! document belongs to other subsystems.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::quota::{PlanTier, UsageCounter};

/// The slice of the user's account document this pipeline touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable identifier from the identity provider.
    pub user_id: UserId,
    /// Subscription tier, read-only input for the quota gate.
    pub plan_tier: PlanTier,
    /// Daily interaction counter.
    pub usage: UsageCounter,
    /// Whether the intake interview has been completed.
    pub intake_completed: bool,
}

impl Account {
    /// Creates a fresh free-tier account.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            plan_tier: PlanTier::Free,
            usage: UsageCounter::new(),
            intake_completed: false,
        }
    }
}

/// Port for reading and updating the account document.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch the account for a user.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no document exists for the user
    /// - `StorageError` on read failure
    async fn fetch(&self, user_id: &UserId) -> Result<Account, DomainError>;

    /// Replace the stored usage counter.
    ///
    /// Plain read-then-write; there is no conditional increment at this
    /// boundary, so concurrent sends from one user can race.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no document exists for the user
    /// - `StorageError` on write failure
    async fn update_usage(&self, user_id: &UserId, usage: &UsageCounter)
        -> Result<(), DomainError>;

    /// Mark the user's intake interview as completed.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no document exists for the user
    /// - `StorageError` on write failure
    async fn set_intake_completed(&self, user_id: &UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn AccountStore) {}
    }

    #[test]
    fn new_account_defaults_to_free_tier() {
        let account = Account::new(UserId::new("user-1").unwrap());
        assert_eq!(account.plan_tier, PlanTier::Free);
        assert!(!account.intake_completed);
        assert_eq!(account.usage.daily_interactions(), 0);
    }
}
