//! The live drop preview computed while a folder is dragged.

use serde::{Deserialize, Serialize};

use foldertree_core::types::FolderId;

/// Where the dragged folder would land if released now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// Projected depth of the dragged folder.
    pub depth: usize,
    /// Projected parent (`None` for the root).
    pub parent_id: Option<FolderId>,
    /// The row under the pointer the projection was computed for.
    pub over_id: FolderId,
    /// Shallowest depth allowed at this position.
    pub min_depth: usize,
    /// Deepest depth allowed at this position.
    pub max_depth: usize,
}
