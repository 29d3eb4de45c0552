//! Callout reconstruction for matched segments
//!
//! A matched segment typically looks like:
//!
//! ```text
//! ## Chapter 3
//!
//! [selected text](calibre://...open_at=epubcfi%28...%29)
//!
//! My thoughts on this passage.
//! ```
//!
//! Leading headers stay outside the callout (converted to HTML headers). The
//! rest is replaced by a blockquote holding the highlight from the export, the
//! link back to the book, and whatever text followed the link.

use crate::annotations::Record;
use crate::config::RenderConfig;
use crate::document::LinkReference;

/// Deepest HTML header level
const MAX_HEADER_LEVEL: usize = 6;

/// Leading headers of a segment, and the body that follows them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSplit<'a> {
    /// Rendered headers and the blank lines between them, one per line
    pub prefix: String,
    /// Everything from the first line that is neither blank nor a header
    pub body: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Header,
    Body,
}

/// Separate leading markdown headers from the body of a segment.
pub fn split_headers(segment: &str) -> HeaderSplit<'_> {
    let mut prefix = String::new();
    let mut zone = Zone::Header;
    let mut body_start = segment.len();
    let mut line_start = 0;

    for line in segment.split('\n') {
        let trimmed = line.trim();
        match zone {
            Zone::Header if trimmed.starts_with('#') => {
                prefix.push_str(&render_header(trimmed));
                prefix.push('\n');
            }
            Zone::Header if trimmed.is_empty() => prefix.push('\n'),
            Zone::Header => {
                zone = Zone::Body;
                body_start = line_start;
            }
            Zone::Body => break,
        }
        line_start += line.len() + 1;
    }

    HeaderSplit {
        prefix,
        body: &segment[body_start..],
    }
}

/// Render a trimmed `#`-prefixed line as `<hN>text</hN>`.
fn render_header(line: &str) -> String {
    let text = line.trim_start_matches('#');
    let hashes = line.len() - text.len();
    let level = hashes.min(MAX_HEADER_LEVEL);
    format!("<h{level}>{}</h{level}>", text.trim())
}

/// Text that followed the link in the body, rendered for the callout.
///
/// Returns `None` when nothing but whitespace follows the link. The `Note:`
/// label is only added when the record itself carries a note.
pub fn render_note(body: &str, link: &LinkReference<'_>, record: &Record) -> Option<String> {
    let after_link = body
        .split_once(link.literal)
        .map_or(body, |(_, after)| after);
    let content = after_link.trim_start();

    if content.trim_end().is_empty() {
        return None;
    }

    if record.has_note() {
        let leading = &after_link[..after_link.len() - content.len()];
        Some(format!("{}<em>Note: </em>{}", leading, content))
    } else {
        Some(after_link.to_string())
    }
}

/// Build the blockquote for a record.
pub fn render_blockquote(
    record: &Record,
    link: &LinkReference<'_>,
    note: Option<&str>,
    config: &RenderConfig,
) -> String {
    let mut inner = format!("{}\n{}", record.highlighted_text, link.to_anchor());

    if let Some(note) = note.filter(|n| !n.trim().is_empty()) {
        if !note.starts_with('\n') {
            inner.push('\n');
        }
        inner.push_str(note.trim_end());
    }

    format!(
        "<blockquote class=\"{}-{}\">\n{}\n</blockquote>",
        config.class_prefix,
        record.class_token(),
        inner
    )
}

/// Replace a matched segment with its headers followed by the callout.
pub fn render_callout(
    segment: &str,
    link: &LinkReference<'_>,
    record: &Record,
    config: &RenderConfig,
) -> String {
    let HeaderSplit { prefix, body } = split_headers(segment);
    let note = render_note(body, link, record);
    let blockquote = render_blockquote(record, link, note.as_deref(), config);

    let headers = prefix.trim_end();
    if headers.is_empty() {
        blockquote
    } else {
        format!("{}\n\n{}", headers, blockquote)
    }
}
