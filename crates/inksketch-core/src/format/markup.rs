//! Vector markup (SVG) export.

use crate::canvas::SketchDocument;
use crate::stroke::StrokeStyle;
use std::fmt::Write;

/// SVG namespace.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// XLink namespace, declared on the root for older consumers.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// How path styles are written.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MarkupStyle {
    /// Each path carries its own stroke width and color.
    #[default]
    PerStroke,
    /// Every path uses the same style (oldest format generation).
    Shared(StrokeStyle),
}

/// Render a document as an `<svg>` element with one `<path>` per stroke,
/// in paint order.
pub fn render_markup(doc: &SketchDocument, style: &MarkupStyle) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        r#"<svg xmlns="{}" xmlns:xlink="{}" version="1.1" width="{}" height="{}">"#,
        SVG_NS, XLINK_NS, doc.width, doc.height
    );

    for stroke in doc.strokes() {
        let path_style = match style {
            MarkupStyle::PerStroke => &stroke.style,
            MarkupStyle::Shared(shared) => shared,
        };
        let _ = write!(
            out,
            r#"<path stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" stroke="{}" fill="none" d="{}"/>"#,
            path_style.width,
            escape_attr(&path_style.color),
            escape_attr(stroke.geometry.as_str()),
        );
    }

    out.push_str("</svg>");
    out
}

/// Escape a string for use inside a double-quoted XML attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
