//! Second format generation: per-stroke geometry, color and width.

use super::{FORMAT_TYPE, FORMAT_VERSION, SKETCH_VERSION, loose_number};
use crate::canvas::SketchDocument;
use crate::stroke::{
    DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, PathData, Stroke, StrokeStyle, is_valid_width,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One serialized stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedPath {
    /// Geometry.
    pub d: String,
    /// Stroke color.
    pub s: String,
    /// Stroke width.
    pub sw: f64,
}

/// V2 serialized sketch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedDocumentV2 {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: f64,
    pub sketch_version: u32,
    pub width: f64,
    pub height: f64,
    /// Strokes, newest first.
    pub paths: Vec<SerializedPath>,
}

/// Export geometry and style, newest stroke first.
pub fn export_v2(doc: &SketchDocument) -> SerializedDocumentV2 {
    SerializedDocumentV2 {
        kind: FORMAT_TYPE.to_string(),
        version: FORMAT_VERSION,
        sketch_version: SKETCH_VERSION,
        width: doc.width,
        height: doc.height,
        paths: doc
            .strokes()
            .iter()
            .rev()
            .map(|stroke| SerializedPath {
                d: stroke.geometry.as_str().to_string(),
                s: stroke.style.color.clone(),
                sw: stroke.style.width,
            })
            .collect(),
    }
}

/// Build strokes from V2 path entries, in the order given.
///
/// Entries without a `d` string are skipped. A missing color or width falls
/// back to the default; the width may be stored as a numeric string.
pub(super) fn import_paths(paths: &[Value]) -> Vec<Stroke> {
    paths.iter().filter_map(import_path).collect()
}

fn import_path(entry: &Value) -> Option<Stroke> {
    let d = entry.get("d").and_then(Value::as_str)?;
    let color = entry
        .get("s")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_STROKE_COLOR);
    let width = entry
        .get("sw")
        .and_then(loose_number)
        .filter(|w| is_valid_width(*w))
        .unwrap_or(DEFAULT_STROKE_WIDTH);

    Some(Stroke::from_geometry(
        PathData::from_raw(d),
        StrokeStyle::new(width, color),
    ))
}
