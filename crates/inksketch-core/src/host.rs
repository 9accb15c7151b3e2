//! Host collaborator: the element tree the surface renders into.

use crate::input::HostOffset;
use crate::stroke::{PathData, Stroke, StrokeId};

/// What the sketching surface needs from its host.
///
/// The host keeps one rendered path per stroke, in paint order, and reports
/// where its element currently sits so event coordinates can be made local.
pub trait SketchHost {
    /// Current position of the host element.
    fn offset(&self) -> HostOffset;

    /// Add a rendered path on top of the others.
    fn push_path(&mut self, stroke: &Stroke);

    /// Replace the geometry of a rendered path.
    fn update_path(&mut self, id: StrokeId, geometry: &PathData);

    /// Remove the topmost rendered path.
    fn pop_path(&mut self);

    /// Remove every rendered path.
    fn clear_paths(&mut self);

    /// Rebuild the rendered paths from scratch.
    fn reset_paths(&mut self, strokes: &[Stroke]) {
        self.clear_paths();
        for stroke in strokes {
            self.push_path(stroke);
        }
    }
}

/// A path as rendered by [`HeadlessHost`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPath {
    pub id: StrokeId,
    pub d: String,
    pub stroke: String,
    pub stroke_width: f64,
}

/// In-memory host for tests and offline conversion.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    /// Offset reported to the surface.
    pub offset: HostOffset,
    /// Rendered paths, back to front.
    pub paths: Vec<RenderedPath>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose element sits at the given position.
    pub fn with_offset(left: f64, top: f64) -> Self {
        Self {
            offset: HostOffset::new(left, top),
            paths: Vec::new(),
        }
    }
}

impl SketchHost for HeadlessHost {
    fn offset(&self) -> HostOffset {
        self.offset
    }

    fn push_path(&mut self, stroke: &Stroke) {
        self.paths.push(RenderedPath {
            id: stroke.id(),
            d: stroke.geometry.to_string(),
            stroke: stroke.style.color.clone(),
            stroke_width: stroke.style.width,
        });
    }

    fn update_path(&mut self, id: StrokeId, geometry: &PathData) {
        if let Some(path) = self.paths.iter_mut().rev().find(|p| p.id == id) {
            path.d = geometry.to_string();
        }
    }

    fn pop_path(&mut self) {
        self.paths.pop();
    }

    fn clear_paths(&mut self) {
        self.paths.clear();
    }
}
