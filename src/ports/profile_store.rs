//! Intake profile store port.
//!
//! One profile document per user. This core creates and completes
//! profiles; it never deletes them.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::intake::IntakeProfile;

/// Port for persisting intake profiles.
#[async_trait]
pub trait IntakeProfileStore: Send + Sync {
    /// Save the profile, overwriting any existing document for the user.
    ///
    /// # Errors
    ///
    /// - `StorageError` on write failure
    async fn save(&self, profile: &IntakeProfile) -> Result<(), DomainError>;

    /// Find the profile for a user.
    ///
    /// Returns `None` if the user has not started (or never persisted)
    /// an intake interview.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<IntakeProfile>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn IntakeProfileStore) {}
    }
}
