//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use foldertree_core::config::AppConfig;
use foldertree_core::types::FolderId;
use foldertree_engine::FolderTreeService;
use foldertree_entity::folder::FolderNode;
use foldertree_store::JsonFileStore;

/// Test application context backed by a JSON folder file in a temp dir
pub struct TestApp {
    /// Keeps the temp dir alive for the duration of the test
    pub dir: TempDir,
    /// Store the service writes through
    pub store: Arc<JsonFileStore>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a folder file holding `records`
    pub async fn new(records: &[FolderNode]) -> Self {
        Self::with_config(records, AppConfig::default()).await
    }

    pub async fn with_config(records: &[FolderNode], mut config: AppConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("folders.json");
        config.storage.folders_file = path.to_string_lossy().into_owned();

        let store = Arc::new(JsonFileStore::from_config(&config.storage));
        store
            .write_folders(records)
            .await
            .expect("Failed to write folder file");

        Self { dir, store, config }
    }

    /// Load a fresh service from the folder file
    pub async fn service(&self) -> FolderTreeService {
        FolderTreeService::load(self.store.clone(), &self.config)
            .await
            .expect("Failed to load folders")
    }

    /// Records currently on disk
    pub async fn stored(&self) -> Vec<FolderNode> {
        let raw = tokio::fs::read(self.store.path())
            .await
            .expect("Failed to read folder file");
        serde_json::from_slice(&raw).expect("Folder file is not valid JSON")
    }

    pub async fn stored_parent(&self, id: i64) -> Option<FolderId> {
        self.stored()
            .await
            .into_iter()
            .find(|record| record.id == FolderId(id))
            .and_then(|record| record.parent)
    }
}

/// A small photo library:
///
/// ```text
/// Photos (1)
///   2023 (2)
///     Summer (3)
///   2024 (4)
/// Clients (5)        locked
///   Acme (6)
/// Drafts (7)
/// ```
pub fn photo_library() -> Vec<FolderNode> {
    vec![
        FolderNode::new(1, "Photos", None).open(true),
        FolderNode::new(2, "2023", Some(FolderId(1))).open(true),
        FolderNode::new(3, "Summer", Some(FolderId(2))),
        FolderNode::new(4, "2024", Some(FolderId(1))),
        FolderNode::new(5, "Clients", None).open(true).locked(true),
        FolderNode::new(6, "Acme", Some(FolderId(5))),
        FolderNode::new(7, "Drafts", None),
    ]
}

pub fn ids<'a>(items: impl IntoIterator<Item = &'a foldertree_entity::FlattenedItem>) -> Vec<i64> {
    items.into_iter().map(|item| item.id().get()).collect()
}
