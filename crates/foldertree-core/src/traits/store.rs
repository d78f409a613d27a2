//! Persistence seam for folder records.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::FolderId;

/// Read/write access to the folder records of one media library.
///
/// The trait is generic over the record type so that `foldertree-core`
/// does not depend on the entity crate. The engine consumes it as
/// `Arc<dyn FolderStore<FolderNode>>`; implementations live in
/// `foldertree-store`.
#[async_trait]
pub trait FolderStore<Record>: Send + Sync + std::fmt::Debug + 'static
where
    Record: Send + Sync + 'static,
{
    /// Return the provider type name (e.g., "memory", "json-file").
    fn provider_type(&self) -> &str;

    /// Fetch every folder record of the library.
    async fn load_folders(&self) -> AppResult<Vec<Record>>;

    /// Persist a new parent for a folder. `None` moves it to the root.
    ///
    /// Last write wins; implementations do not check for concurrent edits.
    async fn update_parent(&self, id: FolderId, parent: Option<FolderId>) -> AppResult<()>;

    /// Persist the canonical pre-order of all folders after a reorder.
    ///
    /// Stores that do not keep a sibling order can ignore this; the
    /// default implementation does nothing.
    async fn save_order(&self, _order: &[FolderId]) -> AppResult<()> {
        Ok(())
    }
}
