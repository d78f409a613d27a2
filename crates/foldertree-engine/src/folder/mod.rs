//! Folder tree algorithms and the service that drives them.

pub mod collapse;
pub mod policy;
pub mod projection;
pub mod reorder;
pub mod service;
pub mod tree;

#[cfg(test)]
pub(crate) mod fixtures;

pub use collapse::{collapsed_ids, remove_children_of};
pub use policy::{RejectReason, check_drop};
pub use projection::project;
pub use reorder::{MoveResult, apply_move};
pub use service::{DropOutcome, FolderTreeService, ReleaseOutcome};
pub use tree::{
    BuildReport, build_tree, build_tree_with_report, descendant_ids, flatten_records,
    flatten_subtree, flatten_tree, subtree_end,
};
