//! The sketching surface: configuration, document and gesture handling.

use crate::canvas::SketchDocument;
use crate::config::{Notify, SketchConfig, width_or};
use crate::format::{self, FormatError};
use crate::host::SketchHost;
use crate::input::RawEvent;
use crate::stroke::DEFAULT_STROKE_WIDTH;
use crate::tools::StrokeRecorder;
use serde_json::Value;

/// What the host should do with an event after the surface saw it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[must_use]
pub struct EventResponse {
    /// The surface acted on the event.
    pub handled: bool,
    /// The host should suppress the default action (touch scrolling).
    pub suppress_default: bool,
}

impl EventResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn handled(suppress_default: bool) -> Self {
        Self {
            handled: true,
            suppress_default,
        }
    }
}

/// A freehand sketching surface bound to a host.
pub struct Sketch<H: SketchHost> {
    host: H,
    config: SketchConfig,
    document: SketchDocument,
    recorder: StrokeRecorder,
}

impl<H: SketchHost> Sketch<H> {
    /// Create a surface with an empty document sized from `config`.
    pub fn new(host: H, mut config: SketchConfig) -> Self {
        config.stroke_width = width_or(config.stroke_width, DEFAULT_STROKE_WIDTH);
        let document = SketchDocument::new(config.width, config.height);
        Self {
            host,
            config,
            document,
            recorder: StrokeRecorder::new(),
        }
    }

    /// Pointer down / touch start.
    pub fn begin(&mut self, event: &RawEvent) -> EventResponse {
        if self.config.disabled || event.is_multi_touch() {
            return EventResponse::ignored();
        }

        // The host element may have moved since the last gesture
        let offset = self.host.offset();
        let style = self.config.stroke_style();
        let Some(id) = self.recorder.begin(event, offset, style, &mut self.document) else {
            return EventResponse::ignored();
        };

        if let Some(stroke) = self.document.stroke(id) {
            self.host.push_path(stroke);
        }
        notify(&self.config.on_draw_start);
        EventResponse::handled(event.is_touch())
    }

    /// Pointer / touch move.
    pub fn drag(&mut self, event: &RawEvent) -> EventResponse {
        if self.config.disabled || !self.recorder.is_drawing() {
            self.recorder.observe_constrain(event.constrain());
            return EventResponse::ignored();
        }
        if event.is_multi_touch() {
            return EventResponse::ignored();
        }

        let min_distance = self.config.min_distance;
        if let Some(id) = self.recorder.update(event, min_distance, &mut self.document) {
            if let Some(stroke) = self.document.stroke(id) {
                self.host.update_path(id, &stroke.geometry);
            }
        }
        EventResponse::handled(event.is_touch())
    }

    /// Pointer up / touch end, wherever it happened.
    pub fn end(&mut self) -> EventResponse {
        if self.config.disabled {
            return EventResponse::ignored();
        }
        match self.recorder.end() {
            Some(_) => {
                notify(&self.config.on_draw_stop);
                EventResponse::handled(false)
            }
            None => EventResponse::ignored(),
        }
    }

    /// The constrain modifier was released outside a move event.
    pub fn release_constrain(&mut self) {
        self.recorder.observe_constrain(false);
    }

    /// Check if a stroke is being drawn.
    pub fn is_drawing(&self) -> bool {
        self.recorder.is_drawing()
    }

    /// Width for the next stroke.
    ///
    /// Zero, negative and non-finite widths are ignored.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.config.stroke_width = width_or(width, self.config.stroke_width);
    }

    /// Color for the next stroke.
    pub fn set_stroke_color(&mut self, color: impl Into<String>) {
        self.config.stroke = color.into();
    }

    /// Enable or disable gesture handling.
    ///
    /// Disabling mid-gesture leaves the stroke as drawn so far.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    pub fn set_on_draw_start(&mut self, f: Option<Notify>) {
        self.config.on_draw_start = f;
    }

    pub fn set_on_draw_stop(&mut self, f: Option<Notify>) {
        self.config.on_draw_stop = f;
    }

    pub fn document(&self) -> &SketchDocument {
        &self.document
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Remove the most recent stroke.
    pub fn undo_last(&mut self) {
        if self.document.undo_last().is_some() {
            self.host.pop_path();
        }
    }

    /// Remove all strokes.
    pub fn clear(&mut self) {
        self.document.clear();
        self.host.clear_paths();
    }

    /// Current drawing as vector markup.
    pub fn to_markup(&self) -> String {
        self.document.to_markup()
    }

    /// Current drawing in the latest serialized format.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(format::export_v2(&self.document)).unwrap_or_else(|e| {
            log::error!("Failed to serialize sketch: {}", e);
            Value::Null
        })
    }

    /// Replace the drawing with a serialized sketch of either version.
    pub fn load_json(&mut self, value: &Value) {
        self.replace_document(format::import_any(value));
    }

    /// Replace the drawing from a serialized string.
    ///
    /// Malformed input leaves an empty canvas of default size.
    pub fn load_str(&mut self, json: &str) {
        self.replace_document(format::import_str(json));
    }

    /// Replace the drawing from a serialized string, reporting malformed input.
    pub fn try_load_str(&mut self, json: &str) -> Result<(), FormatError> {
        let document = format::try_import_str(json)?;
        self.replace_document(document);
        Ok(())
    }

    fn replace_document(&mut self, document: SketchDocument) {
        // A gesture cannot continue into a different document
        self.recorder.end();
        self.document = document;
        self.host.reset_paths(self.document.strokes());
    }
}

fn notify(callback: &Option<Notify>) {
    if let Some(f) = callback {
        f();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use kurbo::Point;
    use std::cell::Cell;
    use std::rc::Rc;

    fn sketch() -> Sketch<HeadlessHost> {
        Sketch::new(HeadlessHost::new(), SketchConfig::default())
    }

    fn draw(sketch: &mut Sketch<HeadlessHost>, points: &[(f64, f64)]) {
        let (x, y) = points[0];
        let _ = sketch.begin(&RawEvent::mouse(x, y));
        for &(x, y) in &points[1..] {
            let _ = sketch.drag(&RawEvent::mouse(x, y));
        }
        let _ = sketch.end();
    }

    #[test]
    fn test_draw_stroke_mirrors_host() {
        let mut sketch = sketch();
        draw(&mut sketch, &[(10.0, 10.0), (20.0, 10.0), (20.0, 30.0)]);

        assert_eq!(sketch.document().len(), 1);
        assert_eq!(sketch.host().paths.len(), 1);
        assert_eq!(sketch.host().paths[0].d, "M10,10l0,0l10,0l0,20");
        assert!(!sketch.is_drawing());
    }

    #[test]
    fn test_offset_read_at_begin() {
        let mut sketch = Sketch::new(HeadlessHost::with_offset(5.0, 5.0), SketchConfig::default());
        let _ = sketch.begin(&RawEvent::mouse(15.0, 15.0));
        // Moving the host mid-gesture does not affect the current stroke
        sketch.host_mut().offset = crate::input::HostOffset::new(100.0, 100.0);
        let _ = sketch.drag(&RawEvent::mouse(25.0, 15.0));
        let _ = sketch.end();

        assert_eq!(sketch.document().strokes()[0].geometry.as_str(), "M10,10l0,0l10,0");

        let _ = sketch.begin(&RawEvent::mouse(150.0, 150.0));
        assert_eq!(sketch.document().strokes()[1].geometry.as_str(), "M50,50l0,0");
    }

    #[test]
    fn test_touch_suppresses_default() {
        let mut sketch = sketch();
        let response = sketch.begin(&RawEvent::touch(1.0, 1.0));
        assert!(response.handled && response.suppress_default);

        let response = sketch.drag(&RawEvent::touch(1.5, 1.0));
        assert!(response.handled && response.suppress_default);

        let mut sketch = self::sketch();
        let response = sketch.begin(&RawEvent::mouse(1.0, 1.0));
        assert!(response.handled && !response.suppress_default);
    }

    #[test]
    fn test_multi_touch_never_creates_stroke() {
        let mut sketch = sketch();
        let two = RawEvent::multi_touch(vec![Point::new(1.0, 1.0), Point::new(9.0, 9.0)]);
        assert!(!sketch.begin(&two).handled);
        assert!(sketch.document().is_empty());
        assert!(sketch.host().paths.is_empty());
    }

    #[test]
    fn test_disabled_ignores_gestures() {
        let mut sketch = sketch();
        sketch.set_disabled(true);
        assert!(!sketch.begin(&RawEvent::mouse(1.0, 1.0)).handled);
        assert!(sketch.document().is_empty());
    }

    #[test]
    fn test_disable_mid_gesture_freezes_stroke() {
        let mut sketch = sketch();
        let _ = sketch.begin(&RawEvent::mouse(0.0, 0.0));
        let _ = sketch.drag(&RawEvent::mouse(10.0, 0.0));
        sketch.set_disabled(true);

        let _ = sketch.drag(&RawEvent::mouse(20.0, 0.0));
        assert!(!sketch.end().handled);
        // Still mid-gesture, but nothing changes while disabled
        assert!(sketch.is_drawing());
        assert_eq!(sketch.document().strokes()[0].geometry.as_str(), "M0,0l0,0l10,0");
    }

    #[test]
    fn test_style_taken_at_begin() {
        let mut sketch = sketch();
        sketch.set_stroke_width(8.0);
        sketch.set_stroke_color("purple");
        let _ = sketch.begin(&RawEvent::mouse(0.0, 0.0));
        sketch.set_stroke_color("orange");
        let _ = sketch.drag(&RawEvent::mouse(10.0, 0.0));
        let _ = sketch.end();

        let stroke = &sketch.document().strokes()[0];
        assert_eq!(stroke.style.color, "purple");
        assert!((stroke.style.width - 8.0).abs() < f64::EPSILON);

        draw(&mut sketch, &[(50.0, 50.0)]);
        assert_eq!(sketch.document().strokes()[1].style.color, "orange");
    }

    #[test]
    fn test_notifications() {
        let started = Rc::new(Cell::new(0));
        let stopped = Rc::new(Cell::new(0));
        let (s, t) = (started.clone(), stopped.clone());
        let config = SketchConfig::default()
            .on_draw_start(move || s.set(s.get() + 1))
            .on_draw_stop(move || t.set(t.get() + 1));
        let mut sketch = Sketch::new(HeadlessHost::new(), config);

        draw(&mut sketch, &[(0.0, 0.0), (10.0, 10.0)]);
        assert_eq!((started.get(), stopped.get()), (1, 1));

        // A stray pointer-up elsewhere on the page
        let _ = sketch.end();
        assert_eq!(stopped.get(), 1);
    }

    #[test]
    fn test_undo_and_clear_mirror_host() {
        let mut sketch = sketch();
        draw(&mut sketch, &[(0.0, 0.0)]);
        draw(&mut sketch, &[(5.0, 5.0)]);

        sketch.undo_last();
        assert_eq!(sketch.document().len(), 1);
        assert_eq!(sketch.host().paths.len(), 1);

        sketch.clear();
        assert!(sketch.document().is_empty());
        assert!(sketch.host().paths.is_empty());

        sketch.undo_last();
        assert!(sketch.document().is_empty());
    }

    #[test]
    fn test_undrawable_width_keeps_previous() {
        let mut sketch = sketch();
        sketch.set_stroke_width(5.0);
        for width in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            sketch.set_stroke_width(width);
        }
        draw(&mut sketch, &[(50.0, 50.0), (60.0, 50.0)]);

        let stroke = &sketch.document().strokes()[0];
        assert!((stroke.style.width - 5.0).abs() < f64::EPSILON);
        assert!(!sketch.to_markup().contains("NaN"));

        let restored = format::import_any(&sketch.to_json());
        assert!(restored.is_equivalent(sketch.document()));
    }

    #[test]
    fn test_undrawable_width_in_config() {
        let config = SketchConfig {
            stroke_width: f64::NAN,
            ..SketchConfig::default()
        };
        let mut sketch = Sketch::new(HeadlessHost::new(), config);
        draw(&mut sketch, &[(0.0, 0.0)]);

        let json = sketch.to_json();
        assert_eq!(json["paths"][0]["sw"], 3.0);
    }

    #[test]
    fn test_release_constrain_when_idle() {
        let mut sketch = sketch();
        sketch.release_constrain();
        assert!(!sketch.drag(&RawEvent::mouse(1.0, 1.0)).handled);
        assert!(sketch.document().is_empty());
    }

    #[test]
    fn test_json_round_trip_through_surface() {
        let mut sketch = sketch();
        sketch.set_stroke_color("teal");
        draw(&mut sketch, &[(0.0, 0.0), (10.0, 0.0)]);
        sketch.set_stroke_width(1.0);
        draw(&mut sketch, &[(50.0, 50.0), (50.0, 60.0)]);

        let json = sketch.to_json();
        assert_eq!(json["sketchVersion"], 2);

        let mut other = self::sketch();
        other.load_json(&json);
        assert!(other.document().is_equivalent(sketch.document()));
        assert_eq!(other.host().paths.len(), 2);
        assert_eq!(other.to_markup(), sketch.to_markup());
    }

    #[test]
    fn test_load_str_fallback() {
        let mut sketch = Sketch::new(
            HeadlessHost::new(),
            SketchConfig {
                width: 800.0,
                height: 600.0,
                ..SketchConfig::default()
            },
        );
        draw(&mut sketch, &[(0.0, 0.0)]);

        sketch.load_str("definitely not json");
        assert!(sketch.document().is_empty());
        assert!(sketch.host().paths.is_empty());
        assert!((sketch.document().width - 300.0).abs() < f64::EPSILON);

        assert!(sketch.try_load_str("[]").is_err());
    }

    #[test]
    fn test_load_during_gesture_ends_it() {
        let mut sketch = sketch();
        let _ = sketch.begin(&RawEvent::mouse(0.0, 0.0));
        sketch.load_json(&serde_json::json!({"paths": ["M1,1l0,0"]}));

        assert!(!sketch.is_drawing());
        assert_eq!(sketch.document().len(), 1);
    }
}
