//! In-memory intake profile store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::intake::IntakeProfile;
use crate::ports::IntakeProfileStore;

/// In-memory implementation of the [`IntakeProfileStore`] port.
///
/// Supports write-failure injection so the intake fallback path can be
/// exercised in tests.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<UserId, IntakeProfile>>,
    fail_saves: AtomicBool,
}

impl InMemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save` fail with a storage error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl IntakeProfileStore for InMemoryProfileStore {
    async fn save(&self, profile: &IntakeProfile) -> Result<(), DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                "Simulated profile write failure",
            ));
        }
        self.profiles
            .write()
            .await
            .insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<IntakeProfile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn save_then_find_round_trips() {
        let store = InMemoryProfileStore::new();
        let profile = IntakeProfile::new(user());
        store.save(&profile).await.unwrap();

        let found = store.find_by_user(&user()).await.unwrap();
        assert_eq!(found, Some(profile));
    }

    #[tokio::test]
    async fn missing_profile_is_none() {
        let store = InMemoryProfileStore::new();
        assert_eq!(store.find_by_user(&user()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn injected_failure_surfaces_as_storage_error() {
        let store = InMemoryProfileStore::new();
        store.set_fail_saves(true);

        let err = store.save(&IntakeProfile::new(user())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);

        store.set_fail_saves(false);
        assert!(store.save(&IntakeProfile::new(user())).await.is_ok());
    }
}
