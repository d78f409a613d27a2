//! The drag gesture as an explicit state machine.
//!
//! `Idle -> Pending -> Dragging -> (commit | cancel) -> Idle`. Every
//! transition is a method returning what happened; calls that do not apply
//! to the current phase are ignored and leave the state untouched.

use tracing::debug;

use foldertree_core::types::FolderId;

use super::sensor::{ActivationConstraint, PointerPosition};

/// Current phase of the gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DragPhase {
    /// No pointer is down on a folder.
    Idle,
    /// A pointer is down on `id` but has not travelled far enough.
    Pending { id: FolderId, origin: PointerPosition },
    /// A folder is being dragged.
    Dragging {
        active_id: FolderId,
        over_id: Option<FolderId>,
        offset_x: f64,
        origin: Option<PointerPosition>,
    },
}

/// What a drop hands to the commit step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragCommit {
    pub active_id: FolderId,
    pub over_id: FolderId,
    pub offset_x: f64,
}

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEnd {
    /// Released over a row: commit the projection.
    Commit(DragCommit),
    /// Released outside the list, cancelled, or never dragging.
    Cancelled,
}

/// Result of a pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMove {
    Ignored,
    StillPending,
    Activated(FolderId),
    Dragged { offset_x: f64 },
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerRelease {
    /// No gesture was in progress.
    Idle,
    /// Released before activation: a click on the folder.
    Click(FolderId),
    /// Released while dragging.
    Drop(DragEnd),
}

/// Drag gesture state for one folder list.
#[derive(Debug, Clone)]
pub struct DragSession {
    phase: DragPhase,
    activation: ActivationConstraint,
}

impl DragSession {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            phase: DragPhase::Idle,
            activation: ActivationConstraint::new(activation_distance),
        }
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// The dragged folder, if a drag is active.
    pub fn active_id(&self) -> Option<FolderId> {
        match self.phase {
            DragPhase::Dragging { active_id, .. } => Some(active_id),
            _ => None,
        }
    }

    /// The row under the pointer, if a drag is active and over a row.
    pub fn over_id(&self) -> Option<FolderId> {
        match self.phase {
            DragPhase::Dragging { over_id, .. } => over_id,
            _ => None,
        }
    }

    /// Horizontal travel since the drag began.
    pub fn offset_x(&self) -> f64 {
        match self.phase {
            DragPhase::Dragging { offset_x, .. } => offset_x,
            _ => 0.0,
        }
    }

    pub fn pointer_down(&mut self, id: FolderId, position: PointerPosition) -> bool {
        if self.phase != DragPhase::Idle {
            debug!(folder_id = %id, phase = ?self.phase, "Pointer down ignored");
            return false;
        }
        self.phase = DragPhase::Pending {
            id,
            origin: position,
        };
        true
    }

    pub fn pointer_move(&mut self, position: PointerPosition) -> PointerMove {
        match self.phase {
            DragPhase::Pending { id, origin } => {
                if !self.activation.is_satisfied(&origin, &position) {
                    return PointerMove::StillPending;
                }
                self.phase = DragPhase::Dragging {
                    active_id: id,
                    over_id: Some(id),
                    offset_x: position.x - origin.x,
                    origin: Some(origin),
                };
                debug!(folder_id = %id, "Drag activated");
                PointerMove::Activated(id)
            }
            DragPhase::Dragging {
                origin: Some(origin),
                ref mut offset_x,
                ..
            } => {
                *offset_x = position.x - origin.x;
                PointerMove::Dragged {
                    offset_x: *offset_x,
                }
            }
            _ => PointerMove::Ignored,
        }
    }

    pub fn pointer_up(&mut self) -> PointerRelease {
        match self.phase {
            DragPhase::Idle => PointerRelease::Idle,
            DragPhase::Pending { id, .. } => {
                self.phase = DragPhase::Idle;
                PointerRelease::Click(id)
            }
            DragPhase::Dragging { .. } => PointerRelease::Drop(self.end()),
        }
    }

    /// Start dragging `id` directly, bypassing the activation distance.
    pub fn start(&mut self, id: FolderId) -> bool {
        if self.is_dragging() {
            debug!(folder_id = %id, "Drag start ignored, already dragging");
            return false;
        }
        self.phase = DragPhase::Dragging {
            active_id: id,
            over_id: Some(id),
            offset_x: 0.0,
            origin: None,
        };
        true
    }

    /// Record the row under the pointer. `None` means outside the list.
    pub fn over(&mut self, id: Option<FolderId>) -> bool {
        match self.phase {
            DragPhase::Dragging {
                ref mut over_id, ..
            } => {
                *over_id = id;
                true
            }
            _ => false,
        }
    }

    /// Record the horizontal travel reported by the host.
    pub fn moved(&mut self, delta_x: f64) -> bool {
        match self.phase {
            DragPhase::Dragging {
                ref mut offset_x, ..
            } => {
                *offset_x = delta_x;
                true
            }
            _ => false,
        }
    }

    /// Finish the drag. Always returns to `Idle`.
    pub fn end(&mut self) -> DragEnd {
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);
        match phase {
            DragPhase::Dragging {
                active_id,
                over_id: Some(over_id),
                offset_x,
                ..
            } => DragEnd::Commit(DragCommit {
                active_id,
                over_id,
                offset_x,
            }),
            _ => DragEnd::Cancelled,
        }
    }

    /// Abandon the gesture. Always returns to `Idle`.
    pub fn cancel(&mut self) -> DragEnd {
        if self.phase != DragPhase::Idle {
            debug!(phase = ?self.phase, "Drag cancelled");
        }
        self.phase = DragPhase::Idle;
        DragEnd::Cancelled
    }
}
