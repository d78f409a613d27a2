//! Folder records kept as a JSON array on the local filesystem.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use foldertree_core::config::storage::StorageConfig;
use foldertree_core::error::{AppError, ErrorKind};
use foldertree_core::result::AppResult;
use foldertree_core::traits::FolderStore;
use foldertree_core::types::FolderId;
use foldertree_entity::folder::FolderNode;

use super::memory::sort_by_order;

/// JSON file folder store.
///
/// Writes go to a sibling temporary file that is renamed over the
/// original, so a crash never leaves a half-written array behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    pretty: bool,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.folders_file, config.pretty)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the whole file with `records`.
    pub async fn write_folders(&self, records: &[FolderNode]) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_unlocked(records).await
    }

    async fn read(&self) -> AppResult<Vec<FolderNode>> {
        let data = fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Folder file not found: {}", self.path.display()))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read folder file: {}", self.path.display()),
                    e,
                )
            }
        })?;

        serde_json::from_slice(&data).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Invalid folder file: {}", self.path.display()),
                e,
            )
        })
    }

    async fn write_unlocked(&self, records: &[FolderNode]) -> AppResult<()> {
        let data = if self.pretty {
            serde_json::to_vec_pretty(records)?
        } else {
            serde_json::to_vec(records)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write folder file: {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace folder file: {}", self.path.display()),
                e,
            )
        })?;

        debug!(path = %self.path.display(), folders = records.len(), "Wrote folder file");
        Ok(())
    }
}

#[async_trait]
impl FolderStore<FolderNode> for JsonFileStore {
    fn provider_type(&self) -> &str {
        "json-file"
    }

    async fn load_folders(&self) -> AppResult<Vec<FolderNode>> {
        self.read().await
    }

    async fn update_parent(&self, id: FolderId, parent: Option<FolderId>) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read().await?;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        record.parent = parent;
        self.write_unlocked(&records).await
    }

    async fn save_order(&self, order: &[FolderId]) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read().await?;
        sort_by_order(&mut records, order);
        self.write_unlocked(&records).await
    }
}
