//! # foldertree-engine
//!
//! The media-library folder tree: converts flat folder records into a
//! depth-annotated pre-order list and back, hides collapsed subtrees,
//! projects where a dragged folder would land, and commits the drop.
//!
//! Everything except [`FolderTreeService::on_drag_end`] is synchronous and
//! runs on the caller's thread. The persistence collaborator is injected
//! at construction time as an `Arc<dyn FolderStore<FolderNode>>`.

pub mod drag;
pub mod folder;

pub use drag::{
    DragCommit, DragEnd, DragPhase, DragSession, PointerMove, PointerPosition, PointerRelease,
};
pub use folder::{
    BuildReport, DropOutcome, FolderTreeService, MoveResult, RejectReason, ReleaseOutcome, apply_move,
    build_tree, build_tree_with_report, check_drop, flatten_tree, project, remove_children_of,
};
