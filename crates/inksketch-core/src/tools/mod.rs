//! Stroke recorder: turns begin/move/end gestures into path geometry.

use crate::canvas::SketchDocument;
use crate::geometry::distance;
use crate::input::{HostOffset, RawEvent, map_event};
use crate::snap::LineSnap;
use crate::stroke::{Stroke, StrokeId, StrokeStyle};
use kurbo::Point;

/// Scratch state of the gesture in progress.
///
/// Replaced wholesale on every begin, so nothing leaks between gestures.
#[derive(Debug, Clone)]
pub struct GestureState {
    /// Stroke being drawn (already in the document).
    pub stroke: StrokeId,
    /// Last point appended to the stroke.
    pub last_point: Point,
    /// Line-snap machine for this gesture.
    pub snap: LineSnap,
    /// Host offset captured at begin.
    pub offset: HostOffset,
}

/// State of the recorder.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Waiting for a gesture.
    #[default]
    Idle,
    /// A stroke is being drawn.
    Drawing(GestureState),
}

/// Records freehand strokes into a document.
#[derive(Debug, Clone, Default)]
pub struct StrokeRecorder {
    state: ToolState,
}

impl StrokeRecorder {
    /// Create an idle recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Gesture in progress, if any.
    pub fn gesture(&self) -> Option<&GestureState> {
        match &self.state {
            ToolState::Drawing(gesture) => Some(gesture),
            ToolState::Idle => None,
        }
    }

    /// Check if a stroke is being drawn.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Drawing(_))
    }

    /// Start a stroke.
    ///
    /// The stroke is appended to `doc` right away with `style` and a
    /// zero-length first segment. Returns `None` (and leaves any previous
    /// state untouched) for multi-touch input or an event without a contact
    /// point.
    pub fn begin(
        &mut self,
        event: &RawEvent,
        offset: HostOffset,
        style: StrokeStyle,
        doc: &mut SketchDocument,
    ) -> Option<StrokeId> {
        if event.is_multi_touch() {
            log::debug!("Ignoring multi-touch begin");
            return None;
        }
        let point = map_event(event, offset)?;

        let mut snap = LineSnap::new();
        let point = snap.apply(point, event.constrain(), point);

        let stroke = Stroke::begin(point, style);
        let id = stroke.id();
        doc.push(stroke);

        self.state = ToolState::Drawing(GestureState {
            stroke: id,
            last_point: point,
            snap,
            offset,
        });
        log::debug!("Stroke {} started at ({}, {})", id, point.x, point.y);
        Some(id)
    }

    /// Extend the current stroke.
    ///
    /// Moves within `min_distance` of the last recorded point are dropped.
    /// Returns the stroke ID when its geometry changed.
    pub fn update(
        &mut self,
        event: &RawEvent,
        min_distance: f64,
        doc: &mut SketchDocument,
    ) -> Option<StrokeId> {
        let ToolState::Drawing(gesture) = &mut self.state else {
            return None;
        };
        if event.is_multi_touch() {
            return None;
        }
        let point = map_event(event, gesture.offset)?;

        if distance(gesture.last_point, point) <= min_distance {
            return None;
        }

        let point = gesture.snap.apply(point, event.constrain(), gesture.last_point);
        // The stroke may have been undone mid-gesture
        let stroke = doc.stroke_mut(gesture.stroke)?;
        stroke.geometry.line_by(point - gesture.last_point);
        gesture.last_point = point;

        Some(gesture.stroke)
    }

    /// Reset the line snap if the constrain modifier is no longer held.
    pub fn observe_constrain(&mut self, held: bool) {
        if held {
            return;
        }
        if let ToolState::Drawing(gesture) = &mut self.state {
            gesture.snap.reset();
        }
    }

    /// End the current gesture. Returns the stroke that was being drawn.
    pub fn end(&mut self) -> Option<StrokeId> {
        match std::mem::take(&mut self.state) {
            ToolState::Drawing(gesture) => {
                log::debug!("Stroke {} finished", gesture.stroke);
                Some(gesture.stroke)
            }
            ToolState::Idle => None,
        }
    }
}
