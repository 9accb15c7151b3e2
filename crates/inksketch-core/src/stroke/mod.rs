//! Stroke records: geometry plus style.

mod path;

pub use path::{PathData, PathError};

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default stroke width in host units.
pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// Default stroke color.
pub const DEFAULT_STROKE_COLOR: &str = "#ff0028";

/// Whether a stroke can be drawn at `width`.
///
/// Zero, negative and non-finite widths render nothing and do not survive
/// a save and reload.
pub fn is_valid_width(width: f64) -> bool {
    width.is_finite() && width > 0.0
}

/// Unique identifier for strokes.
pub type StrokeId = Uuid;

/// Style properties for a stroke.
///
/// The color is kept as the token the host supplied (`#ff0028`, `red`,
/// `rgb(…)`) and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke width.
    pub width: f64,
    /// Stroke color.
    pub color: String,
}

impl StrokeStyle {
    pub fn new(width: f64, color: impl Into<String>) -> Self {
        Self {
            width,
            color: color.into(),
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(DEFAULT_STROKE_WIDTH, DEFAULT_STROKE_COLOR)
    }
}

/// One continuous drawn gesture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: StrokeId,
    /// Encoded geometry.
    pub geometry: PathData,
    /// Style captured when the stroke began.
    pub style: StrokeStyle,
}

impl Stroke {
    /// Begin a new stroke at `start`.
    pub fn begin(start: Point, style: StrokeStyle) -> Self {
        Self::from_geometry(PathData::begin(start), style)
    }

    /// Create a stroke from existing geometry.
    pub fn from_geometry(geometry: PathData, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            style,
        }
    }

    /// Get the unique identifier.
    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Same geometry and style, regardless of identity.
    pub fn is_equivalent(&self, other: &Stroke) -> bool {
        self.geometry == other.geometry && self.style == other.style
    }
}
