//! Offline conversion of saved sketches.

use inksketch_core::format::{self, FormatError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What to produce from a saved sketch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Standalone vector markup.
    #[default]
    Markup,
    /// The sketch re-encoded in the latest serialized format.
    Json,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("Failed to encode sketch: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Convert a serialized sketch of either version.
///
/// With `strict`, input that is not a JSON object is an error; otherwise it
/// converts as an empty canvas of default size, like the browser does.
pub fn convert_str(
    input: &str,
    output: OutputFormat,
    strict: bool,
) -> Result<String, ConvertError> {
    let document = if strict {
        format::try_import_str(input)?
    } else {
        format::import_str(input)
    };
    log::debug!(
        "Loaded {}x{} sketch with {} strokes",
        document.width,
        document.height,
        document.len()
    );

    match output {
        OutputFormat::Markup => Ok(document.to_markup()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&format::export_v2(&document))?),
    }
}

/// Read a sketch file and convert it.
pub fn convert_file(
    path: &Path,
    output: OutputFormat,
    strict: bool,
) -> Result<String, ConvertError> {
    let input = std::fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    convert_str(&input, output, strict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const V1: &str = r#"{"type":"svg","version":1.1,"width":50,"height":40,"paths":["M5,5l0,0l10,0","M1,1l0,0"]}"#;

    #[test]
    fn test_markup_from_v1() {
        let markup = convert_str(V1, OutputFormat::Markup, true).unwrap();
        assert!(markup.starts_with("<svg"));
        assert!(markup.contains(r#"width="50""#));
        // Paint order: oldest (last in the file) first
        let first = markup.find(r#"d="M1,1l0,0""#).unwrap();
        let second = markup.find(r#"d="M5,5l0,0l10,0""#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_upgrade_v1_to_v2() {
        let json = convert_str(V1, OutputFormat::Json, true).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["sketchVersion"], 2);
        assert_eq!(value["paths"][0]["d"], "M5,5l0,0l10,0");
        assert_eq!(value["paths"][0]["s"], "#ff0028");
        assert_eq!(value["paths"][1]["sw"], 3.0);
    }

    #[test]
    fn test_strict_rejects_garbage() {
        assert!(matches!(
            convert_str("not a sketch", OutputFormat::Markup, true),
            Err(ConvertError::Format(_))
        ));

        let markup = convert_str("not a sketch", OutputFormat::Markup, false).unwrap();
        assert!(markup.contains(r#"width="300""#));
        assert!(!markup.contains("<path"));
    }

    #[test]
    fn test_missing_file() {
        let err = convert_file(Path::new("/nonexistent/sketch.json"), OutputFormat::Markup, false)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Read { .. }));
        assert!(err.to_string().contains("sketch.json"));
    }
}
