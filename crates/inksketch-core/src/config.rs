//! Sketching surface configuration.

use crate::canvas::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::stroke::{DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, StrokeStyle, is_valid_width};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::rc::Rc;

/// Default decimation threshold in host units.
pub const DEFAULT_MIN_DISTANCE: f64 = 3.0;

/// Zero-argument notification invoked on the host's event thread.
pub type Notify = Rc<dyn Fn()>;

/// Options for a sketching surface.
///
/// Deserializes from the host's option object; `size` and `color` are
/// accepted as older spellings of `strokeWidth` and `stroke`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SketchConfig {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Moves no farther than this from the last recorded point are dropped.
    pub min_distance: f64,
    /// Width for new strokes.
    #[serde(alias = "size", deserialize_with = "deserialize_stroke_width")]
    pub stroke_width: f64,
    /// Color for new strokes.
    #[serde(alias = "color")]
    pub stroke: String,
    /// Ignore all gestures while set.
    pub disabled: bool,
    /// Called when a stroke begins.
    #[serde(skip)]
    pub on_draw_start: Option<Notify>,
    /// Called when a gesture ends.
    #[serde(skip)]
    pub on_draw_stop: Option<Notify>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            min_distance: DEFAULT_MIN_DISTANCE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke: DEFAULT_STROKE_COLOR.to_string(),
            disabled: false,
            on_draw_start: None,
            on_draw_stop: None,
        }
    }
}

impl SketchConfig {
    /// Style applied to the next stroke.
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::new(self.stroke_width, self.stroke.clone())
    }

    /// Set the draw-start notification.
    pub fn on_draw_start(mut self, f: impl Fn() + 'static) -> Self {
        self.on_draw_start = Some(Rc::new(f));
        self
    }

    /// Set the draw-stop notification.
    pub fn on_draw_stop(mut self, f: impl Fn() + 'static) -> Self {
        self.on_draw_stop = Some(Rc::new(f));
        self
    }
}

/// `width` if a stroke can be drawn with it, otherwise `fallback`.
pub(crate) fn width_or(width: f64, fallback: f64) -> f64 {
    if is_valid_width(width) {
        width
    } else {
        log::warn!("Ignoring stroke width {}, using {}", width, fallback);
        fallback
    }
}

fn deserialize_stroke_width<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let width = f64::deserialize(deserializer)?;
    Ok(width_or(width, DEFAULT_STROKE_WIDTH))
}

impl fmt::Debug for SketchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SketchConfig")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("min_distance", &self.min_distance)
            .field("stroke_width", &self.stroke_width)
            .field("stroke", &self.stroke)
            .field("disabled", &self.disabled)
            .field("on_draw_start", &self.on_draw_start.is_some())
            .field("on_draw_stop", &self.on_draw_stop.is_some())
            .finish()
    }
}
