//! HTML generation
//!
//! Builds the blockquote callouts that replace matched segments and the style
//! block that colors them.

mod callout;
mod stylesheet;

pub use callout::{render_blockquote, render_callout, render_note, split_headers, HeaderSplit};
pub use stylesheet::generate_stylesheet;
