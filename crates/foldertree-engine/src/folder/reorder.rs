//! Committing a projected drop into the canonical folder list.

use foldertree_core::error::AppError;
use foldertree_core::result::AppResult;
use foldertree_core::types::FolderId;
use foldertree_entity::folder::{FlattenedItem, FolderNode, Projection};

use super::tree::{flatten_records, subtree_end};

/// The canonical list after a drop.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// New canonical pre-order list, depths recomputed.
    pub items: Vec<FlattenedItem>,
    /// The moved folder.
    pub id: FolderId,
    /// Parent before the drop.
    pub previous_parent: Option<FolderId>,
    /// Parent after the drop.
    pub parent: Option<FolderId>,
    /// Whether order or parent differ from the input.
    pub changed: bool,
}

/// Move `active_id` to the index of `over_id` in the canonical list and
/// re-parent it under `projection.parent_id`.
///
/// Only the dragged row moves; its descendants keep their `parent` links
/// and follow it when the list is rebuilt. Depths are recomputed from the
/// parent links rather than copied from the projection.
pub fn apply_move(
    items: &[FlattenedItem],
    active_id: FolderId,
    over_id: FolderId,
    projection: &Projection,
) -> AppResult<MoveResult> {
    let active_ix = position(items, active_id)?;
    let over_ix = position(items, over_id)?;
    let parent = projection.parent_id;

    if let Some(parent_id) = parent {
        let parent_ix = position(items, parent_id)?;
        if parent_ix >= active_ix && parent_ix < subtree_end(items, active_ix) {
            return Err(AppError::validation(format!(
                "Cannot move folder {active_id} into its own subtree ({parent_id})"
            )));
        }
    }

    let mut records: Vec<FolderNode> = items.iter().map(|item| item.folder.clone()).collect();
    let mut moved = records.remove(active_ix);
    let previous_parent = moved.parent;
    moved.parent = parent;
    records.insert(over_ix, moved);

    let (rebuilt, report) = flatten_records(&records);
    if !report.is_clean() {
        return Err(AppError::internal(format!(
            "Reorder produced an inconsistent tree: {report:?}"
        )));
    }

    let changed = rebuilt.len() != items.len()
        || rebuilt
            .iter()
            .zip(items)
            .any(|(after, before)| after.id() != before.id() || after.parent_id != before.parent_id);

    Ok(MoveResult {
        items: rebuilt,
        id: active_id,
        previous_parent,
        parent,
        changed,
    })
}

fn position(items: &[FlattenedItem], id: FolderId) -> AppResult<usize> {
    items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
}
