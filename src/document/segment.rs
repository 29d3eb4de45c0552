//! Delimiter-preserving document segmentation

use std::sync::LazyLock;

use regex::Regex;

/// A horizontal rule alone on its line: newline, three or more hyphens, newline
static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n-{3,}\n").expect("delimiter pattern is valid"));

/// A slice of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Horizontal rule, including its surrounding newlines
    Delimiter(&'a str),
    /// Text between delimiters
    Content(&'a str),
}

impl<'a> Segment<'a> {
    /// The original text of the segment
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Delimiter(text) | Segment::Content(text) => text,
        }
    }

    pub fn is_delimiter(&self) -> bool {
        matches!(self, Segment::Delimiter(_))
    }
}

/// Split a document on horizontal rules, keeping the rules as their own segments.
///
/// Concatenating the returned segments yields the input exactly. Empty content
/// slices (before a leading rule, between adjacent rules, after a trailing rule)
/// are not emitted.
pub fn split_segments(document: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for delimiter in DELIMITER.find_iter(document) {
        if delimiter.start() > cursor {
            segments.push(Segment::Content(&document[cursor..delimiter.start()]));
        }
        segments.push(Segment::Delimiter(delimiter.as_str()));
        cursor = delimiter.end();
    }

    if cursor < document.len() {
        segments.push(Segment::Content(&document[cursor..]));
    }

    segments
}
