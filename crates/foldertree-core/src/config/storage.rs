//! Folder record storage configuration.

use serde::{Deserialize, Serialize};

/// Where the command-line tool reads and writes folder records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the JSON array of folder records.
    #[serde(default = "default_folders_file")]
    pub folders_file: String,
    /// Pretty-print the JSON file on write.
    #[serde(default)]
    pub pretty: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            folders_file: default_folders_file(),
            pretty: false,
        }
    }
}

fn default_folders_file() -> String {
    "data/folders.json".to_string()
}
