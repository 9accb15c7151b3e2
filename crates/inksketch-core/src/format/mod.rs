//! Serialized sketch formats and version migration.
//!
//! Two JSON generations exist:
//!
//! * V1: `{type, version, width, height, paths: ["M…", …]}`, no per-stroke
//!   style; strokes get the default style on reload.
//! * V2: same envelope plus `sketchVersion: 2`, with `paths` holding
//!   `{d, s, sw}` objects (geometry, color, width).
//!
//! Both list paths newest-first. Import is lenient: missing or malformed
//! fields fall back to defaults instead of failing.

mod markup;
mod v1;
mod v2;

pub use markup::{MarkupStyle, SVG_NS, XLINK_NS, render_markup};
pub use v1::{SerializedDocumentV1, export_v1};
pub use v2::{SerializedDocumentV2, SerializedPath, export_v2};

use crate::canvas::{DEFAULT_HEIGHT, DEFAULT_WIDTH, SketchDocument};
use serde_json::Value;
use thiserror::Error;

/// Value of the `type` field.
pub const FORMAT_TYPE: &str = "svg";

/// Value of the `version` field (the markup version, not the sketch version).
pub const FORMAT_VERSION: f64 = 1.1;

/// Latest sketch format version.
pub const SKETCH_VERSION: u32 = 2;

/// Errors from string import.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Sketch format generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    V1,
    V2,
}

/// Detect the format generation of a serialized sketch.
///
/// Older writers stored `sketchVersion` as a string, so the tag is coerced
/// to a number before comparing: `2`, `2.0` and `"2"` all select V2.
pub fn detect_version(value: &Value) -> FormatVersion {
    match value.get("sketchVersion").and_then(loose_number) {
        Some(v) if v == f64::from(SKETCH_VERSION) => FormatVersion::V2,
        _ => FormatVersion::V1,
    }
}

/// Rebuild a document from either format generation.
///
/// Never fails: anything that is not a recognizable sketch yields an empty
/// document of default size.
pub fn import_any(value: &Value) -> SketchDocument {
    let width = field_number(value, "width").unwrap_or(DEFAULT_WIDTH);
    let height = field_number(value, "height").unwrap_or(DEFAULT_HEIGHT);
    let mut doc = SketchDocument::new(width, height);

    let paths = value
        .get("paths")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let version = detect_version(value);
    let strokes = match version {
        FormatVersion::V1 => v1::import_paths(paths),
        FormatVersion::V2 => v2::import_paths(paths),
    };

    log::debug!("Imported {:?} sketch with {} strokes", version, strokes.len());

    // Paths are stored newest-first
    for stroke in strokes.into_iter().rev() {
        doc.push(stroke);
    }
    doc
}

/// Parse a serialized sketch string, reporting malformed input.
pub fn try_import_str(json: &str) -> Result<SketchDocument, FormatError> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(FormatError::NotAnObject(json_kind(&value)));
    }
    Ok(import_any(&value))
}

/// Parse a serialized sketch string.
///
/// Malformed input yields an empty document of default size.
pub fn import_str(json: &str) -> SketchDocument {
    try_import_str(json).unwrap_or_else(|e| {
        log::warn!("Falling back to an empty sketch: {}", e);
        SketchDocument::default()
    })
}

/// Render a serialized sketch string straight to markup.
pub fn markup_from_str(json: &str) -> String {
    import_str(json).to_markup()
}

/// Read a number that may have been stored as a string.
pub(crate) fn loose_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

fn field_number(value: &Value, key: &str) -> Option<f64> {
    value
        .get(key)
        .and_then(loose_number)
        .filter(|n| n.is_finite())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
