//! File-based intake fallback cache.
//!
//! Stores one YAML file per user under a base directory. Local-only:
//! this is the parking spot for intake completions whose remote write
//! failed, until reconciliation replays them.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::UserId;
use crate::ports::{CacheError, CachedIntake, IntakeFallbackCache};

/// File-backed implementation of the [`IntakeFallbackCache`] port.
#[derive(Debug, Clone)]
pub struct FileIntakeCache {
    base_path: PathBuf,
}

impl FileIntakeCache {
    /// Create a new cache rooted at a base directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the cache file for a user. Identity-provider ids can carry
    /// separators ("auth0|123"), so everything outside [A-Za-z0-9_-] is
    /// mapped to '_'.
    fn entry_path(&self, user_id: &UserId) -> PathBuf {
        let safe: String = user_id
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.yaml", safe))
    }

    async fn ensure_base_dir(&self) -> Result<(), CacheError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| CacheError::Io(e.to_string()))
    }
}

#[async_trait]
impl IntakeFallbackCache for FileIntakeCache {
    async fn store(&self, entry: &CachedIntake) -> Result<(), CacheError> {
        self.ensure_base_dir().await?;

        let yaml = serde_yaml::to_string(entry).map_err(|e| CacheError::Io(e.to_string()))?;
        fs::write(self.entry_path(&entry.user_id), yaml)
            .await
            .map_err(|e| CacheError::Io(e.to_string()))
    }

    async fn load(&self, user_id: &UserId) -> Result<Option<CachedIntake>, CacheError> {
        let path = self.entry_path(user_id);
        if !path.exists() {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&path)
            .await
            .map_err(|e| CacheError::Io(e.to_string()))?;

        let entry = serde_yaml::from_str(&yaml).map_err(|e| CacheError::Corrupt {
            user_id: user_id.as_str().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(entry))
    }

    async fn remove(&self, user_id: &UserId) -> Result<(), CacheError> {
        let path = self.entry_path(user_id);
        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| CacheError::Io(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::intake::{IntakeResponse, QuestionCategory};
    use tempfile::TempDir;

    fn user() -> UserId {
        UserId::new("auth0|user-1").unwrap()
    }

    fn entry() -> CachedIntake {
        CachedIntake {
            user_id: user(),
            responses: vec![IntakeResponse {
                step_index: 0,
                question_index: 0,
                question_text: "Como você gostaria de ser chamado(a)?".into(),
                category: QuestionCategory::Identity,
                response_text: "Ana".into(),
            }],
            completed_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn store_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let cache = FileIntakeCache::new(dir.path());

        cache.store(&entry()).await.unwrap();
        let loaded = cache.load(&user()).await.unwrap().unwrap();
        assert_eq!(loaded.responses.len(), 1);
        assert_eq!(loaded.responses[0].response_text, "Ana");
    }

    #[tokio::test]
    async fn load_missing_entry_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = FileIntakeCache::new(dir.path());
        assert!(cache.load(&user()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_clears_the_entry() {
        let dir = TempDir::new().unwrap();
        let cache = FileIntakeCache::new(dir.path());

        cache.store(&entry()).await.unwrap();
        cache.remove(&user()).await.unwrap();
        assert!(cache.load(&user()).await.unwrap().is_none());

        // Removing again is a no-op.
        cache.remove(&user()).await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_entry_is_reported_as_corrupt() {
        let dir = TempDir::new().unwrap();
        let cache = FileIntakeCache::new(dir.path());
        cache.store(&entry()).await.unwrap();

        let path = cache.entry_path(&user());
        tokio::fs::write(&path, ": not yaml [").await.unwrap();

        assert!(matches!(
            cache.load(&user()).await,
            Err(CacheError::Corrupt { .. })
        ));
    }
}
