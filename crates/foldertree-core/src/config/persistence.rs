//! Behaviour of the optimistic parent update after a drop.

use serde::{Deserialize, Serialize};

/// Retry and rollback policy for `FolderStore::update_parent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Total attempts per committed move (1 = no retry).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay between attempts in milliseconds.
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
    /// Restore the pre-drop order when every attempt failed.
    #[serde(default = "default_true")]
    pub revert_on_failure: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff(),
            revert_on_failure: default_true(),
        }
    }
}

fn default_max_attempts() -> u32 {
    1
}

fn default_retry_backoff() -> u64 {
    200
}

fn default_true() -> bool {
    true
}
