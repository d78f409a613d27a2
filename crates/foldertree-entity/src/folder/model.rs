//! Folder record model.

use serde::{Deserialize, Serialize};

use foldertree_core::types::FolderId;
use foldertree_core::types::id::parent_ref;

/// Flags attached to a folder by the sidebar's context menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMeta {
    /// Locked folders can neither be dragged nor receive children.
    #[serde(default)]
    pub locked: bool,
    /// Bookmarked folders are pinned in the sidebar header.
    #[serde(default)]
    pub bookmark: bool,
}

/// A folder in the media library, as stored and fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Display name.
    pub name: String,
    /// Parent folder (`None` for root folders).
    #[serde(with = "parent_ref", default)]
    pub parent: Option<FolderId>,
    /// Lock and bookmark flags.
    #[serde(default)]
    pub meta: FolderMeta,
    /// Number of media items filed in this folder.
    #[serde(default)]
    pub attachment_count: u64,
    /// Whether the folder is expanded in the sidebar.
    #[serde(default)]
    pub is_open: bool,
}

impl FolderNode {
    /// Create an unlocked, collapsed folder record.
    pub fn new(id: i64, name: impl Into<String>, parent: Option<FolderId>) -> Self {
        Self {
            id: FolderId(id),
            name: name.into(),
            parent,
            meta: FolderMeta::default(),
            attachment_count: 0,
            is_open: false,
        }
    }

    /// Builder-style setter for the lock flag.
    pub fn locked(mut self, locked: bool) -> Self {
        self.meta.locked = locked;
        self
    }

    /// Builder-style setter for the expanded flag.
    pub fn open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if this folder is locked.
    pub fn is_locked(&self) -> bool {
        self.meta.locked
    }
}
