//! InkSketch Core Library
//!
//! Platform-agnostic gesture-to-path pipeline for a freehand sketching
//! surface, plus the versioned sketch formats.

pub mod canvas;
pub mod config;
pub mod format;
pub mod geometry;
pub mod host;
pub mod input;
pub mod snap;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use canvas::SketchDocument;
pub use config::{Notify, SketchConfig};
pub use format::{FormatError, FormatVersion, MarkupStyle, import_any, import_str, try_import_str};
pub use geometry::{Axis, distance, dominant_axis};
pub use host::{HeadlessHost, SketchHost};
pub use input::{HostOffset, Modifiers, PointerInput, RawEvent, map_event};
pub use snap::{LineSnap, SnapState, LINE_SNAP_TOLERANCE};
pub use stroke::{PathData, PathError, Stroke, StrokeId, StrokeStyle, is_valid_width};
pub use surface::{EventResponse, Sketch};
pub use tools::{GestureState, StrokeRecorder, ToolState};
