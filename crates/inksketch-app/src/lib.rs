//! InkSketch Application
//!
//! Host shells around the core sketching surface: the browser binding
//! and the offline converter used by the `inksketch` binary.

mod convert;
mod slots;

pub use convert::{ConvertError, OutputFormat, convert_file, convert_str};
pub use slots::PathSlots;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{SketchPad, start};
