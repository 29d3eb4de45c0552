//! Document module
//!
//! Works on the markdown file Calibre exports alongside the annotations (or a
//! hand-edited copy of it). Highlights are separated by horizontal rules; each
//! section refers back to the book through a locator link.
//!
//! Only the two constructs needed for the merge are recognized: `---` rules
//! and `[text](scheme://...open_at=epubcfi%28...%29)` links.

mod link;
mod matcher;
mod segment;

pub use link::{find_link, LinkReference};
pub use matcher::{match_segment, SegmentMatch};
pub use segment::{split_segments, Segment};
