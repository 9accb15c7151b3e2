//! First format generation: bare geometry strings, one shared style.

use super::{FORMAT_TYPE, FORMAT_VERSION};
use crate::canvas::SketchDocument;
use crate::stroke::{PathData, Stroke, StrokeStyle};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// V1 serialized sketch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedDocumentV1 {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: f64,
    pub width: f64,
    pub height: f64,
    /// Geometry strings, newest first.
    pub paths: Vec<String>,
}

/// Export geometry only, newest stroke first.
pub fn export_v1(doc: &SketchDocument) -> SerializedDocumentV1 {
    SerializedDocumentV1 {
        kind: FORMAT_TYPE.to_string(),
        version: FORMAT_VERSION,
        width: doc.width,
        height: doc.height,
        paths: doc
            .strokes()
            .iter()
            .rev()
            .map(|s| s.geometry.as_str().to_string())
            .collect(),
    }
}

/// Build strokes from V1 path entries, in the order given.
///
/// Entries that are not strings are skipped.
pub(super) fn import_paths(paths: &[Value]) -> Vec<Stroke> {
    paths
        .iter()
        .filter_map(Value::as_str)
        .map(|d| Stroke::from_geometry(PathData::from_raw(d), StrokeStyle::default()))
        .collect()
}
