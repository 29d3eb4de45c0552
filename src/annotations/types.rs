//! Annotation records as exported by Calibre's e-book viewer
//!
//! Calibre writes one object per annotation:
//!
//! ```json
//! {
//!   "type": "highlight",
//!   "spine_index": 3,
//!   "start_cfi": "/4/2/6",
//!   "highlighted_text": "quoted text",
//!   "notes": "my note",
//!   "style": { "kind": "color", "type": "builtin", "which": "yellow" }
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::color;

/// Annotation entry exactly as it appears in the export
///
/// Every field is optional so that bookmarks and partial entries still
/// deserialize; eligibility is decided when converting into a [`Record`].
/// A field of the wrong type reads as absent instead of rejecting the entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnnotation {
    #[serde(default, deserialize_with = "lenient")]
    pub start_cfi: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub spine_index: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub highlighted_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub style: Option<RawStyle>,
}

/// Calibre highlight style
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStyle {
    #[serde(default, deserialize_with = "lenient")]
    pub which: Option<String>,
}

/// Read any JSON value, keeping it only if it has the expected type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// A highlight that can be matched against document links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Position of the chapter in the book's spine (0-based)
    pub spine_index: u64,
    /// Locator within the chapter, without the spine step
    pub start_cfi: String,
    /// The highlighted passage
    pub highlighted_text: String,
    /// Note attached to the highlight
    pub notes: Option<String>,
    /// Highlighter color token
    pub color: Option<String>,
}

impl Record {
    /// Create a highlight with no note and no color
    pub fn new_highlight(spine_index: u64, start_cfi: &str, highlighted_text: &str) -> Self {
        Self {
            spine_index,
            start_cfi: start_cfi.to_string(),
            highlighted_text: highlighted_text.to_string(),
            notes: None,
            color: None,
        }
    }

    /// Set the note
    pub fn with_note(mut self, note: &str) -> Self {
        self.notes = Some(note.to_string());
        self
    }

    /// Set the color token
    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Key under which this record appears in document links
    pub fn locator_key(&self) -> String {
        locator_key(self.spine_index, &self.start_cfi)
    }

    /// Whether the note carries any non-whitespace text
    pub fn has_note(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// Non-empty color token, if any
    pub fn color_token(&self) -> Option<&str> {
        self.color.as_deref().filter(|c| !c.is_empty())
    }

    /// Sanitized token used in the callout class name
    pub fn class_token(&self) -> String {
        color::class_token(self.color_token())
    }
}

impl TryFrom<RawAnnotation> for Record {
    type Error = RawAnnotation;

    /// Keep only entries that carry both a non-empty `start_cfi` and a `spine_index`.
    fn try_from(raw: RawAnnotation) -> Result<Self, Self::Error> {
        match (&raw.start_cfi, raw.spine_index) {
            (Some(cfi), Some(spine_index)) if !cfi.is_empty() => Ok(Self {
                spine_index,
                start_cfi: cfi.clone(),
                highlighted_text: raw.highlighted_text.unwrap_or_default(),
                notes: raw.notes,
                color: raw.style.and_then(|s| s.which),
            }),
            _ => Err(raw),
        }
    }
}

/// Build the key a Calibre `open_at=epubcfi(...)` link uses for a highlight.
///
/// Calibre links address the spine item as an even-numbered step
/// (index 0 -> /2, index 1 -> /4, ...), prefixed to the in-chapter locator.
pub fn locator_key(spine_index: u64, start_cfi: &str) -> String {
    let step = u128::from(spine_index) * 2 + 2;
    format!("/{}{}", step, start_cfi)
}
