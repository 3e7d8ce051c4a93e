//! In-memory account store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::quota::UsageCounter;
use crate::ports::{Account, AccountStore};

/// In-memory implementation of the [`AccountStore`] port.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<UserId, Account>>,
}

impl InMemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account (for tests and development wiring).
    pub async fn insert(&self, account: Account) {
        self.accounts
            .write()
            .await
            .insert(account.user_id.clone(), account);
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn fetch(&self, user_id: &UserId) -> Result<Account, DomainError> {
        self.accounts
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AccountNotFound, "Account not found")
                    .with_detail("user_id", user_id.as_str())
            })
    }

    async fn update_usage(
        &self,
        user_id: &UserId,
        usage: &UsageCounter,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(user_id).ok_or_else(|| {
            DomainError::new(ErrorCode::AccountNotFound, "Account not found")
                .with_detail("user_id", user_id.as_str())
        })?;
        account.usage = usage.clone();
        Ok(())
    }

    async fn set_intake_completed(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(user_id).ok_or_else(|| {
            DomainError::new(ErrorCode::AccountNotFound, "Account not found")
                .with_detail("user_id", user_id.as_str())
        })?;
        account.intake_completed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quota::PlanTier;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn fetch_unknown_user_is_not_found() {
        let store = InMemoryAccountStore::new();
        let err = store.fetch(&user()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountNotFound);
    }

    #[tokio::test]
    async fn update_usage_replaces_counter() {
        let store = InMemoryAccountStore::new();
        store.insert(Account::new(user())).await;

        let mut usage = UsageCounter::new();
        usage.record_interaction();
        store.update_usage(&user(), &usage).await.unwrap();

        let account = store.fetch(&user()).await.unwrap();
        assert_eq!(account.usage.daily_interactions(), 1);
        assert_eq!(account.plan_tier, PlanTier::Free);
    }

    #[tokio::test]
    async fn set_intake_completed_flips_flag() {
        let store = InMemoryAccountStore::new();
        store.insert(Account::new(user())).await;

        store.set_intake_completed(&user()).await.unwrap();
        assert!(store.fetch(&user()).await.unwrap().intake_completed);
    }
}
