//! Annotation module
//!
//! Reads Calibre annotation exports and indexes highlights by the locator key
//! that Calibre embeds in `calibre://...open_at=epubcfi(...)` links.
//!
//! Only highlights with a `start_cfi` and a `spine_index` are indexed; bookmarks
//! and malformed entries are skipped without failing the export.

mod index;
mod types;

pub use index::{parse_export, RecordIndex};
pub use types::{locator_key, RawAnnotation, RawStyle, Record};
