//! Chat pipeline configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::quota::DEFAULT_FREE_DAILY_MESSAGES;

/// Chat pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// How many recent messages are carried into each inference call
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Daily message ceiling for free-tier accounts
    #[serde(default = "default_free_daily_messages")]
    pub free_daily_messages: u32,

    /// Directory for the local intake fallback cache
    #[serde(default = "default_intake_cache_dir")]
    pub intake_cache_dir: PathBuf,
}

impl ChatConfig {
    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_window == 0 {
            return Err(ValidationError::InvalidHistoryWindow);
        }
        if self.free_daily_messages == 0 {
            return Err(ValidationError::InvalidDailyCeiling);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            free_daily_messages: default_free_daily_messages(),
            intake_cache_dir: default_intake_cache_dir(),
        }
    }
}

fn default_history_window() -> usize {
    10
}

fn default_free_daily_messages() -> u32 {
    DEFAULT_FREE_DAILY_MESSAGES
}

fn default_intake_cache_dir() -> PathBuf {
    PathBuf::from("./data/intake-cache")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(ChatConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_history_window_is_rejected() {
        let cfg = ChatConfig {
            history_window: 0,
            ..ChatConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidHistoryWindow)
        ));
    }

    #[test]
    fn zero_daily_ceiling_is_rejected() {
        let cfg = ChatConfig {
            free_daily_messages: 0,
            ..ChatConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidDailyCeiling)
        ));
    }
}
