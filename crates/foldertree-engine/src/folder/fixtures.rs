//! Shared builders for the folder module's unit tests.

use foldertree_core::types::FolderId;
use foldertree_entity::folder::{FlattenedItem, FolderNode};

use super::tree::flatten_records;

pub(crate) fn folder(id: i64, parent: Option<i64>) -> FolderNode {
    FolderNode::new(id, format!("Folder {id}"), parent.map(FolderId))
}

pub(crate) fn ids(items: &[FlattenedItem]) -> Vec<i64> {
    items.iter().map(|item| item.id().0).collect()
}

/// Canonical rows for `(id, parent)` pairs, every folder expanded.
pub(crate) fn flat(pairs: &[(i64, Option<i64>)]) -> Vec<FlattenedItem> {
    let records: Vec<FolderNode> = pairs
        .iter()
        .map(|&(id, parent)| folder(id, parent).open(true))
        .collect();
    flatten_records(&records).0
}
