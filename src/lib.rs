//! Calibre Callouts
//!
//! Merges a Calibre annotation export (JSON) with the markdown highlights file
//! exported alongside it. Every section of the markdown that links to a known
//! highlight is replaced by a color-coded `<blockquote>` carrying the highlight
//! text, a link back to the book and any note written below the link. A
//! `<style>` block for the colors in use is prepended.
//!
//! # Modules
//!
//! - `annotations`: export parsing and the locator index
//! - `document`: segmentation and locator links
//! - `html`: callouts and the style block
//! - `render`: the merge itself
//! - `color`, `config`, `io`: supporting pieces
//!
//! # Example
//!
//! ```
//! let export = r#"{"annotations": [{"spine_index": 3, "start_cfi": "/4/2/6",
//!     "highlighted_text": "quoted text", "style": {"which": "yellow"}}]}"#;
//! let document = "# Title\n\n[sel](calibre://x?open_at=epubcfi%28%2F8%2F4%2F2%2F6%29)\n";
//!
//! let html = calibre_callouts::format_annotations(export, document).unwrap();
//! assert!(html.contains("<blockquote class=\"bq-yellow\">"));
//! ```
//!
//! Rendering is not idempotent: feeding the output back in is not supported.

pub mod annotations;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod html;
pub mod io;
pub mod render;

pub use config::{Config, RenderConfig};
pub use error::{FormatError, Result};
pub use render::{format_annotations, render, render_with_index, Rendered};
