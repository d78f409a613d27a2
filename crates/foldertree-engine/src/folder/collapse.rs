//! Hiding collapsed subtrees from the rendered list.

use std::collections::HashSet;

use foldertree_core::types::FolderId;
use foldertree_entity::folder::FlattenedItem;

/// Drop every descendant of the folders in `hidden` from a pre-order list.
///
/// The hidden folders themselves stay in the output: a collapsed folder is
/// still rendered, and the dragged folder stays as the placeholder row the
/// projection moves around. Runs in a single pass using a depth watermark.
pub fn remove_children_of(
    items: &[FlattenedItem],
    hidden: &HashSet<FolderId>,
) -> Vec<FlattenedItem> {
    let mut visible = Vec::with_capacity(items.len());
    let mut suppress_below: Option<usize> = None;

    for item in items {
        if let Some(depth) = suppress_below {
            if item.depth > depth {
                continue;
            }
            suppress_below = None;
        }
        if hidden.contains(&item.id()) {
            suppress_below = Some(item.depth);
        }
        visible.push(item.clone());
    }

    visible
}

/// Ids of every folder that is not expanded.
pub fn collapsed_ids(items: &[FlattenedItem]) -> HashSet<FolderId> {
    items
        .iter()
        .filter(|item| !item.is_open())
        .map(FlattenedItem::id)
        .collect()
}
