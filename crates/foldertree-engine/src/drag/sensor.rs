//! Click-versus-drag disambiguation.

use serde::{Deserialize, Serialize};

/// A pointer position in list coordinates, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &PointerPosition) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A pointer-down turns into a drag once the pointer travelled `distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationConstraint {
    pub distance: f64,
}

impl ActivationConstraint {
    pub fn new(distance: f64) -> Self {
        Self {
            distance: distance.max(0.0),
        }
    }

    pub fn is_satisfied(&self, origin: &PointerPosition, current: &PointerPosition) -> bool {
        origin.distance_to(current) >= self.distance
    }
}
