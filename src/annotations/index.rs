//! Locator index over an annotation export

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;
use serde_json::Value;

use super::types::{RawAnnotation, Record};
use crate::error::{FormatError, Result};

/// Container fields that may hold the annotation array, in lookup order
const CONTAINER_FIELDS: [&str; 2] = ["annotations", "highlights"];

/// Characters of the offending input quoted in parse errors
const SNIPPET_CHARS: usize = 100;

/// Parse an annotation export into eligible records.
///
/// Fails when the text is blank, is not JSON, or has no `annotations` /
/// `highlights` array. Entries that are not well-formed highlights are skipped.
pub fn parse_export(text: &str) -> Result<Vec<Record>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if text.trim().is_empty() {
        return Err(FormatError::malformed(
            "Invalid input: Resolved JSON annotations string is empty.",
        ));
    }

    let data: Value = serde_json::from_str(text).map_err(|e| {
        let snippet: String = text.chars().take(SNIPPET_CHARS).collect();
        FormatError::malformed(format!(
            "Invalid JSON data: {}. Problem near: \"{}...\"",
            e, snippet
        ))
    })?;

    let entries = CONTAINER_FIELDS
        .iter()
        .find_map(|field| data.get(*field).and_then(Value::as_array))
        .ok_or_else(|| {
            FormatError::malformed("Invalid JSON structure: \"annotations\" array not found.")
        })?;

    let mut records = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        let raw = match RawAnnotation::deserialize(entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Skipping annotation #{}: {}", position, e);
                continue;
            }
        };
        match Record::try_from(raw) {
            Ok(record) => records.push(record),
            Err(_) => tracing::debug!("Skipping annotation #{}: no locator", position),
        }
    }

    Ok(records)
}

/// Lookup table from locator key to record
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    by_key: HashMap<String, Record>,
    observed_colors: BTreeSet<String>,
}

impl RecordIndex {
    /// Index records by their locator key. Later records replace earlier ones
    /// that derive the same key.
    pub fn build(records: impl IntoIterator<Item = Record>) -> Self {
        let mut index = Self::default();
        for record in records {
            if let Some(token) = record.color_token() {
                index.observed_colors.insert(token.to_string());
            }
            index.by_key.insert(record.locator_key(), record);
        }
        index
    }

    /// Parse an export and index it
    pub fn from_export(text: &str) -> Result<Self> {
        let index = Self::build(parse_export(text)?);
        tracing::debug!(
            "Indexed {} annotations ({} colors)",
            index.len(),
            index.observed_colors.len()
        );
        Ok(index)
    }

    /// Find the record for a decoded locator
    pub fn get(&self, locator: &str) -> Option<&Record> {
        self.by_key.get(locator)
    }

    /// Color tokens carried by any indexed record, matched or not
    pub fn observed_colors(&self) -> &BTreeSet<String> {
        &self.observed_colors
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{
        "version": 1,
        "type": "calibre_annotation_collection",
        "annotations": [
            {"type": "highlight", "spine_index": 3, "start_cfi": "/4/2/6",
             "highlighted_text": "quoted text", "notes": "",
             "style": {"kind": "color", "type": "builtin", "which": "yellow"}},
            {"type": "highlight", "spine_index": 5, "start_cfi": "/2/10",
             "highlighted_text": "second", "notes": "why this matters"},
            {"type": "bookmark", "title": "Chapter 3", "pos": "epubcfi(/8/2)"},
            {"type": "highlight", "spine_index": "7", "start_cfi": "/2"},
            "not an object"
        ]
    }"#;

    #[test]
    fn test_parse_export_skips_ineligible() {
        let records = parse_export(EXPORT).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].highlighted_text, "quoted text");
        assert_eq!(records[1].notes.as_deref(), Some("why this matters"));
    }

    #[test]
    fn test_index_lookup() {
        let index = RecordIndex::from_export(EXPORT).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("/8/4/2/6").unwrap().highlighted_text, "quoted text");
        assert_eq!(index.get("/12/2/10").unwrap().highlighted_text, "second");
        assert!(index.get("/4/2/6").is_none());
    }

    #[test]
    fn test_observed_colors_only_from_eligible() {
        let index = RecordIndex::from_export(EXPORT).unwrap();
        let colors: Vec<&str> = index.observed_colors().iter().map(String::as_str).collect();
        assert_eq!(colors, vec!["yellow"]);
    }

    #[test]
    fn test_mistyped_optional_fields_keep_entry() {
        let index = RecordIndex::from_export(
            r#"{"annotations": [
                {"spine_index": 3, "start_cfi": "/4/2/6", "highlighted_text": "quoted text",
                 "notes": 5, "style": {"which": "yellow"}},
                {"spine_index": 5, "start_cfi": "/2/10", "highlighted_text": 12,
                 "notes": "kept", "style": "yellow"},
                {"spine_index": 6, "start_cfi": "/2", "style": {"which": ["red"]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(index.len(), 3);

        let first = index.get("/8/4/2/6").unwrap();
        assert_eq!(first.highlighted_text, "quoted text");
        assert_eq!(first.notes, None);
        assert_eq!(first.color.as_deref(), Some("yellow"));

        let second = index.get("/12/2/10").unwrap();
        assert_eq!(second.highlighted_text, "");
        assert_eq!(second.notes.as_deref(), Some("kept"));
        assert_eq!(second.color, None);

        assert_eq!(index.get("/14/2").unwrap().class_token(), "default");
    }

    #[test]
    fn test_highlights_container() {
        let index = RecordIndex::from_export(
            r#"{"highlights": [{"spine_index": 0, "start_cfi": "/2/4"}]}"#,
        )
        .unwrap();
        assert!(index.get("/2/2/4").is_some());
    }

    #[test]
    fn test_non_array_annotations_falls_back_to_highlights() {
        let index = RecordIndex::from_export(
            r#"{"annotations": {}, "highlights": [{"spine_index": 1, "start_cfi": "/2"}]}"#,
        )
        .unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_later_duplicate_wins() {
        let index = RecordIndex::build(vec![
            Record::new_highlight(1, "/2", "first"),
            Record::new_highlight(1, "/2", "second"),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("/4/2").unwrap().highlighted_text, "second");
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let text = format!("\u{feff}{}", EXPORT);
        assert_eq!(RecordIndex::from_export(&text).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_input_is_malformed() {
        let err = parse_export("   \n").unwrap_err();
        assert!(matches!(err, FormatError::MalformedInput(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_invalid_json_includes_snippet() {
        let text = format!("{{not json {}", "x".repeat(200));
        let err = parse_export(&text).unwrap_err();
        let message = err.to_string();

        assert!(message.starts_with("Invalid JSON data:"));
        let snippet: String = text.chars().take(100).collect();
        assert!(message.contains(&format!("\"{}...\"", snippet)));
        assert!(!message.contains(&"x".repeat(150)));
    }

    #[test]
    fn test_missing_container_is_malformed() {
        let err = parse_export(r#"{"bookmarks": []}"#).unwrap_err();
        assert!(err.to_string().contains("\"annotations\" array not found"));

        assert!(parse_export("[1, 2, 3]").is_err());
    }
}
