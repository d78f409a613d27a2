//! In-memory folder store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use foldertree_core::error::AppError;
use foldertree_core::result::AppResult;
use foldertree_core::traits::FolderStore;
use foldertree_core::types::FolderId;
use foldertree_entity::folder::FolderNode;

/// Folder records held in memory.
///
/// Every `update_parent` call is recorded, and the next N calls can be
/// made to fail with [`MemoryFolderStore::fail_next_updates`].
#[derive(Debug, Default)]
pub struct MemoryFolderStore {
    /// Records in persisted order.
    records: RwLock<Vec<FolderNode>>,
    /// Every `update_parent` call, failed ones included.
    updates: RwLock<Vec<(FolderId, Option<FolderId>)>>,
    /// Remaining calls that fail before touching the records.
    failures: AtomicU32,
}

impl MemoryFolderStore {
    pub fn new(records: Vec<FolderNode>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Make the next `count` parent updates fail.
    pub fn fail_next_updates(&self, count: u32) {
        self.failures.store(count, Ordering::SeqCst);
    }

    /// Snapshot of the stored records.
    pub async fn records(&self) -> Vec<FolderNode> {
        self.records.read().await.clone()
    }

    /// Every parent update received so far, in call order.
    pub async fn updates(&self) -> Vec<(FolderId, Option<FolderId>)> {
        self.updates.read().await.clone()
    }

    fn take_failure(&self) -> bool {
        self.failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl FolderStore<FolderNode> for MemoryFolderStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn load_folders(&self) -> AppResult<Vec<FolderNode>> {
        Ok(self.records.read().await.clone())
    }

    async fn update_parent(&self, id: FolderId, parent: Option<FolderId>) -> AppResult<()> {
        self.updates.write().await.push((id, parent));
        if self.take_failure() {
            return Err(AppError::storage(format!(
                "Injected failure updating folder {id}"
            )));
        }

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        record.parent = parent;
        debug!(folder_id = %id, parent = ?parent, "Parent updated in memory");
        Ok(())
    }

    async fn save_order(&self, order: &[FolderId]) -> AppResult<()> {
        let mut records = self.records.write().await;
        sort_by_order(&mut records, order);
        Ok(())
    }
}

/// Stable-sort `records` so ids listed in `order` come first, in that order.
pub(crate) fn sort_by_order(records: &mut [FolderNode], order: &[FolderId]) {
    let mut ranks: HashMap<FolderId, usize> = HashMap::with_capacity(order.len());
    for (rank, &id) in order.iter().enumerate() {
        ranks.entry(id).or_insert(rank);
    }
    records.sort_by_key(|record| ranks.get(&record.id).copied().unwrap_or(order.len()));
}
