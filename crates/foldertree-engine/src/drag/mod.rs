//! Pointer gesture handling for folder drags.

pub mod sensor;
pub mod session;

pub use sensor::{ActivationConstraint, PointerPosition};
pub use session::{DragCommit, DragEnd, DragPhase, DragSession, PointerMove, PointerRelease};
