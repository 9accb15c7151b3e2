//! Sketch document: the ordered list of strokes.

use crate::format::{self, MarkupStyle};
use crate::stroke::{Stroke, StrokeId};
use serde::{Deserialize, Serialize};

/// Default canvas width.
pub const DEFAULT_WIDTH: f64 = 300.0;

/// Default canvas height.
pub const DEFAULT_HEIGHT: f64 = 300.0;

/// A sketch document.
///
/// Insertion order is paint order: later strokes are drawn on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchDocument {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Strokes, back to front.
    strokes: Vec<Stroke>,
}

impl Default for SketchDocument {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl SketchDocument {
    /// Create a new empty document.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            strokes: Vec::new(),
        }
    }

    /// Append a stroke on top of the others.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Remove the most recently added stroke.
    pub fn undo_last(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Remove all strokes.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Get a stroke by ID.
    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    /// Get a mutable reference to a stroke by ID.
    pub fn stroke_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        // The stroke being drawn is almost always the last one
        self.strokes.iter_mut().rev().find(|s| s.id() == id)
    }

    /// Strokes in paint order (back to front).
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The topmost stroke.
    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Get the number of strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Same size and equivalent strokes in the same order.
    pub fn is_equivalent(&self, other: &SketchDocument) -> bool {
        (self.width - other.width).abs() < f64::EPSILON
            && (self.height - other.height).abs() < f64::EPSILON
            && self.strokes.len() == other.strokes.len()
            && self
                .strokes
                .iter()
                .zip(&other.strokes)
                .all(|(a, b)| a.is_equivalent(b))
    }

    /// Render as vector markup, each path with its own style.
    pub fn to_markup(&self) -> String {
        format::render_markup(self, &MarkupStyle::PerStroke)
    }

    /// Render as vector markup with an explicit style policy.
    pub fn to_markup_with(&self, style: &MarkupStyle) -> String {
        format::render_markup(self, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeStyle;
    use kurbo::Point;

    fn stroke_at(x: f64, y: f64) -> Stroke {
        Stroke::begin(Point::new(x, y), StrokeStyle::default())
    }

    #[test]
    fn test_document_creation() {
        let doc = SketchDocument::default();
        assert!(doc.is_empty());
        assert!((doc.width - DEFAULT_WIDTH).abs() < f64::EPSILON);
        assert!((doc.height - DEFAULT_HEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_push_keeps_paint_order() {
        let mut doc = SketchDocument::default();
        let first = stroke_at(0.0, 0.0);
        let second = stroke_at(5.0, 5.0);
        let second_id = second.id();
        doc.push(first);
        doc.push(second);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.last().map(Stroke::id), Some(second_id));
        assert_eq!(doc.strokes()[1].id(), second_id);
    }

    #[test]
    fn test_undo_last() {
        let mut doc = SketchDocument::default();
        doc.push(stroke_at(0.0, 0.0));
        doc.push(stroke_at(1.0, 1.0));

        let removed = doc.undo_last().unwrap();
        assert_eq!(removed.geometry.as_str(), "M1,1l0,0");
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut doc = SketchDocument::default();
        assert!(doc.undo_last().is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_clear_then_undo() {
        let mut doc = SketchDocument::default();
        doc.push(stroke_at(0.0, 0.0));
        doc.push(stroke_at(1.0, 1.0));

        doc.clear();
        assert!(doc.is_empty());
        assert!(doc.undo_last().is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_undo_then_readd_is_equivalent() {
        let mut doc = SketchDocument::default();
        doc.push(stroke_at(0.0, 0.0));
        doc.push(stroke_at(2.0, 3.0));
        let before = doc.clone();

        let removed = doc.undo_last().unwrap();
        doc.push(Stroke::from_geometry(removed.geometry, removed.style));

        assert!(doc.is_equivalent(&before));
    }

    #[test]
    fn test_stroke_mut_by_id() {
        let mut doc = SketchDocument::default();
        let stroke = stroke_at(0.0, 0.0);
        let id = stroke.id();
        doc.push(stroke);

        doc.stroke_mut(id).unwrap().style.width = 8.0;
        assert!((doc.stroke(id).unwrap().style.width - 8.0).abs() < f64::EPSILON);
        assert!(doc.stroke_mut(uuid::Uuid::new_v4()).is_none());
    }
}
