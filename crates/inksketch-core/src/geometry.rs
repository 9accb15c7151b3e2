//! Small geometry helpers shared by the snap machine and the recorder.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Axis a constrained line is locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal movement: y is pinned.
    X,
    /// Vertical movement: x is pinned.
    Y,
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Dominant direction of movement from `a` to `b`.
///
/// Ties resolve to [`Axis::X`].
pub fn dominant_axis(a: Point, b: Point) -> Axis {
    let offset_x = (a.x - b.x).abs();
    let offset_y = (a.y - b.y).abs();

    if offset_x < offset_y { Axis::Y } else { Axis::X }
}
