//! Compact path-data encoding for strokes.
//!
//! Strokes are recorded as an absolute move-to followed by relative line-to
//! deltas: `M10,20l0,0l4,-3l5,1`. The string is used verbatim as the `d`
//! attribute of the rendered path and as the geometry in serialized sketches.

use kurbo::{BezPath, PathEl, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from decoding path data.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Invalid path data: {0}")]
    Parse(String),
    #[error("Path data does not start with a move-to")]
    MissingMoveTo,
}

/// Encoded stroke geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathData(String);

impl PathData {
    /// Start a stroke at `start` with a zero-length segment, so a tap
    /// without movement still renders as a dot.
    pub fn begin(start: Point) -> Self {
        Self(format!("M{},{}l0,0", start.x, start.y))
    }

    /// Wrap an existing path-data string without validating it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Append a relative line segment.
    pub fn line_by(&mut self, delta: Vec2) {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = write!(self.0, "l{},{}", delta.x, delta.y);
    }

    /// The encoded string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a kurbo path (relative segments are resolved to absolute).
    pub fn to_bez_path(&self) -> Result<BezPath, PathError> {
        let path = BezPath::from_svg(&self.0).map_err(|e| PathError::Parse(e.to_string()))?;
        match path.elements().first() {
            Some(PathEl::MoveTo(_)) => Ok(path),
            _ => Err(PathError::MissingMoveTo),
        }
    }

    /// Replay the segments into the absolute point sequence.
    ///
    /// Curve segments contribute their end points only.
    pub fn points(&self) -> Result<Vec<Point>, PathError> {
        let path = self.to_bez_path()?;
        let points = path
            .elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => Some(p),
                PathEl::ClosePath => None,
            })
            .collect();
        Ok(points)
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
