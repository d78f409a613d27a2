//! Depth-annotated folder rows in display order.

use serde::{Deserialize, Serialize};

use foldertree_core::types::FolderId;

use super::model::FolderNode;

/// A folder record placed in a pre-order traversal of the tree.
///
/// `parent_id` duplicates `folder.parent` so that flatten/build round-trips
/// do not need to look the record up again. The engine keeps the two equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedItem {
    /// The folder record.
    #[serde(flatten)]
    pub folder: FolderNode,
    /// Distance to a root (roots are depth 0).
    pub depth: usize,
    /// Parent folder (`None` for root folders).
    pub parent_id: Option<FolderId>,
}

impl FlattenedItem {
    /// Wrap a record at the given depth, taking the parent from the record.
    pub fn new(folder: FolderNode, depth: usize) -> Self {
        let parent_id = folder.parent;
        Self {
            folder,
            depth,
            parent_id,
        }
    }

    /// Folder id.
    #[inline]
    pub fn id(&self) -> FolderId {
        self.folder.id
    }

    /// Whether the folder is locked.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.folder.meta.locked
    }

    /// Whether the folder is expanded.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.folder.is_open
    }
}
