//! Axis snapping for constrained (shift-held) line drawing.

use crate::geometry::{Axis, distance, dominant_axis};
use kurbo::Point;

/// Distance from the anchor the pointer must travel before an axis is chosen.
pub const LINE_SNAP_TOLERANCE: f64 = 10.0;

/// State of the line-snap machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SnapState {
    /// Constrain modifier not held; points pass through.
    #[default]
    Free,
    /// Modifier held, waiting for movement to reveal a direction.
    AnchorPending { anchor: Point },
    /// Direction established; the other coordinate is pinned.
    Locked { axis: Axis },
}

/// Line-snap state machine.
///
/// Lets a stroke start freehand and lock to one axis once the constrain
/// modifier is held and the pointer has moved far enough from where the
/// modifier was first seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSnap {
    state: SnapState,
}

impl LineSnap {
    /// Create a machine in the free state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SnapState {
        self.state
    }

    /// Locked axis, if any.
    pub fn locked_axis(&self) -> Option<Axis> {
        match self.state {
            SnapState::Locked { axis } => Some(axis),
            _ => None,
        }
    }

    /// Whether the constrain modifier is currently engaged.
    pub fn is_engaged(&self) -> bool {
        self.state != SnapState::Free
    }

    /// Drop anchor and axis.
    pub fn reset(&mut self) {
        self.state = SnapState::Free;
    }

    /// Feed one point through the machine.
    ///
    /// `previous` is the last point emitted for the current stroke; a locked
    /// axis pins the other coordinate to it.
    pub fn apply(&mut self, point: Point, constrain: bool, previous: Point) -> Point {
        if !constrain {
            self.reset();
            return point;
        }

        if let SnapState::AnchorPending { anchor } = self.state {
            if distance(anchor, point) > LINE_SNAP_TOLERANCE {
                let axis = dominant_axis(anchor, point);
                log::debug!("Line snap locked to {:?} axis", axis);
                self.state = SnapState::Locked { axis };
            }
        }

        match self.state {
            SnapState::Free => {
                self.state = SnapState::AnchorPending { anchor: point };
                point
            }
            SnapState::AnchorPending { .. } => point,
            SnapState::Locked { axis: Axis::X } => Point::new(point.x, previous.y),
            SnapState::Locked { axis: Axis::Y } => Point::new(previous.x, point.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_passes_through() {
        let mut snap = LineSnap::new();
        let p = Point::new(3.0, 4.0);
        assert_eq!(snap.apply(p, false, Point::ZERO), p);
        assert_eq!(snap.state(), SnapState::Free);
    }

    #[test]
    fn test_anchor_then_lock_x() {
        let mut snap = LineSnap::new();

        let first = snap.apply(Point::new(0.0, 0.0), true, Point::ZERO);
        assert_eq!(first, Point::new(0.0, 0.0));
        assert_eq!(snap.state(), SnapState::AnchorPending { anchor: Point::ZERO });

        let second = snap.apply(Point::new(1.0, 1.0), true, first);
        assert_eq!(second, Point::new(1.0, 1.0));
        assert!(matches!(snap.state(), SnapState::AnchorPending { .. }));

        let third = snap.apply(Point::new(11.0, 0.0), true, second);
        assert_eq!(snap.locked_axis(), Some(Axis::X));
        // y pinned to the previous output, not the anchor
        assert_eq!(third, Point::new(11.0, 1.0));

        let fourth = snap.apply(Point::new(20.0, 7.0), true, third);
        assert_eq!(fourth, Point::new(20.0, 1.0));
    }

    #[test]
    fn test_lock_y() {
        let mut snap = LineSnap::new();
        let anchor = Point::new(50.0, 50.0);
        snap.apply(anchor, true, anchor);

        let out = snap.apply(Point::new(53.0, 70.0), true, anchor);
        assert_eq!(snap.locked_axis(), Some(Axis::Y));
        assert_eq!(out, Point::new(50.0, 70.0));
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let mut snap = LineSnap::new();
        snap.apply(Point::ZERO, true, Point::ZERO);

        // Exactly at the tolerance: still pending
        let out = snap.apply(Point::new(LINE_SNAP_TOLERANCE, 0.0), true, Point::ZERO);
        assert_eq!(out, Point::new(LINE_SNAP_TOLERANCE, 0.0));
        assert!(matches!(snap.state(), SnapState::AnchorPending { .. }));
    }

    #[test]
    fn test_release_resets() {
        let mut snap = LineSnap::new();
        snap.apply(Point::ZERO, true, Point::ZERO);
        snap.apply(Point::new(30.0, 0.0), true, Point::ZERO);
        assert!(snap.is_engaged());

        let p = Point::new(40.0, 9.0);
        assert_eq!(snap.apply(p, false, Point::ZERO), p);
        assert_eq!(snap.state(), SnapState::Free);

        // Holding again picks a fresh anchor
        snap.apply(Point::new(40.0, 9.0), true, p);
        assert_eq!(
            snap.state(),
            SnapState::AnchorPending {
                anchor: Point::new(40.0, 9.0)
            }
        );
    }
}
