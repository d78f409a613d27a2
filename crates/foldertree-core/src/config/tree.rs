//! Drag-and-drop geometry settings for the folder sidebar.

use serde::{Deserialize, Serialize};

/// Geometry used by the projection engine and the drag activation sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Horizontal indentation per tree level, in pixels.
    ///
    /// Must match the indentation used by the row renderer, otherwise the
    /// projected depth drifts away from the pointer.
    #[serde(default = "default_indent_width")]
    pub indent_width_px: f64,
    /// Minimum pointer travel before a pointer-down becomes a drag.
    #[serde(default = "default_activation_distance")]
    pub activation_distance_px: f64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            indent_width_px: default_indent_width(),
            activation_distance_px: default_activation_distance(),
        }
    }
}

fn default_indent_width() -> f64 {
    24.0
}

fn default_activation_distance() -> f64 {
    10.0
}
