//! Drop rules layered on top of the geometric projection.

use serde::Serialize;
use thiserror::Error;

use foldertree_core::types::FolderId;
use foldertree_entity::folder::{FlattenedItem, Projection};

use super::tree::subtree_end;

/// Why a projected drop may not be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", content = "folderId", rename_all = "snake_case")]
pub enum RejectReason {
    /// The dragged folder is an "All"/"Uncategorized" pseudo-folder.
    #[error("pseudo-folder {0} cannot be moved")]
    SentinelSource(FolderId),
    /// The pointer is over a pseudo-folder row.
    #[error("pseudo-folder {0} is not a drop target")]
    SentinelTarget(FolderId),
    /// The dragged folder is locked.
    #[error("folder {0} is locked")]
    LockedSource(FolderId),
    /// The projected parent is locked.
    #[error("target folder {0} is locked")]
    LockedTarget(FolderId),
    /// The projected parent is the dragged folder or one of its descendants.
    #[error("folder {0} cannot be moved into its own subtree")]
    Cycle(FolderId),
    /// A folder involved in the drop is not part of the tree.
    #[error("folder {0} is not in the tree")]
    UnknownFolder(FolderId),
}

/// Check a projection against the lock, sentinel, and subtree rules.
///
/// `items` is the canonical (unfiltered) pre-order list.
pub fn check_drop(
    items: &[FlattenedItem],
    active_id: FolderId,
    projection: &Projection,
) -> Result<(), RejectReason> {
    if active_id.is_sentinel() {
        return Err(RejectReason::SentinelSource(active_id));
    }
    if projection.over_id.is_sentinel() {
        return Err(RejectReason::SentinelTarget(projection.over_id));
    }

    let active_ix = items
        .iter()
        .position(|item| item.id() == active_id)
        .ok_or(RejectReason::UnknownFolder(active_id))?;
    if items[active_ix].is_locked() {
        return Err(RejectReason::LockedSource(active_id));
    }

    let Some(parent_id) = projection.parent_id else {
        return Ok(());
    };
    if parent_id.is_sentinel() {
        return Err(RejectReason::SentinelTarget(parent_id));
    }
    let parent_ix = items
        .iter()
        .position(|item| item.id() == parent_id)
        .ok_or(RejectReason::UnknownFolder(parent_id))?;
    if parent_ix >= active_ix && parent_ix < subtree_end(items, active_ix) {
        return Err(RejectReason::Cycle(active_id));
    }
    if items[parent_ix].is_locked() {
        return Err(RejectReason::LockedTarget(parent_id));
    }

    Ok(())
}
