//! Merge an annotation export with its markdown document

use std::collections::BTreeSet;

use crate::annotations::RecordIndex;
use crate::color::DEFAULT_TOKEN;
use crate::config::RenderConfig;
use crate::document::{match_segment, split_segments, Segment, SegmentMatch};
use crate::error::Result;
use crate::html::{generate_stylesheet, render_callout};

/// Rendered form of every horizontal rule
const RULE: &str = "\n<hr>\n";

/// Result of a merge
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Style block followed by the rewritten document
    pub output: String,
    /// Number of segments replaced by a callout
    pub matched_count: usize,
    /// Decoded locators of links that matched no annotation
    pub unresolved_locators: Vec<String>,
}

/// Merge `annotations` (a Calibre JSON export) into `document` (markdown).
///
/// Fails only when the export cannot be read; every other problem leaves the
/// affected segment unchanged.
pub fn render(annotations: &str, document: &str, config: &RenderConfig) -> Result<Rendered> {
    let index = RecordIndex::from_export(annotations)?;
    Ok(render_with_index(&index, document, config))
}

/// Merge with an already built index.
pub fn render_with_index(index: &RecordIndex, document: &str, config: &RenderConfig) -> Rendered {
    let mut body = String::with_capacity(document.len());
    let mut colors: BTreeSet<String> = BTreeSet::new();
    let mut matched_count = 0;
    let mut unresolved_locators = Vec::new();

    for segment in split_segments(document) {
        let content = match segment {
            Segment::Delimiter(_) => {
                body.push_str(RULE);
                continue;
            }
            Segment::Content(content) => content,
        };

        match match_segment(content, index) {
            SegmentMatch::Matched { link, record } => {
                body.push_str(&render_callout(content, &link, record, config));
                colors.insert(record.class_token());
                matched_count += 1;
            }
            SegmentMatch::Unresolved { locator, .. } => {
                unresolved_locators.push(locator);
                body.push_str(content);
            }
            SegmentMatch::NoLink | SegmentMatch::Undecodable(_) => body.push_str(content),
        }
    }

    if colors.is_empty() && !index.is_empty() && index.observed_colors().is_empty() {
        colors.insert(DEFAULT_TOKEN.to_string());
    }

    let stylesheet = generate_stylesheet(
        colors.iter().map(String::as_str),
        &config.class_prefix,
        &config.palette,
    );

    tracing::info!(
        "Rendered {} callouts ({} unresolved links)",
        matched_count,
        unresolved_locators.len()
    );

    Rendered {
        output: stylesheet + &body,
        matched_count,
        unresolved_locators,
    }
}

/// Merge with the default configuration and return only the output text.
pub fn format_annotations(annotations: &str, document: &str) -> Result<String> {
    Ok(render(annotations, document, &RenderConfig::default())?.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::Record;

    const EMPTY_STYLE: &str = "<style>\n/* Calibre Annotation Styles */\n</style>\n\n";

    fn link(encoded: &str) -> String {
        format!("[sel](calibre://x?open_at=epubcfi%28{}%29)", encoded)
    }

    #[test]
    fn test_passthrough_without_links_or_rules() {
        let index = RecordIndex::default();
        let doc = "# Notes\n\nNothing to replace here.\n";
        let rendered = render_with_index(&index, doc, &RenderConfig::default());

        assert_eq!(rendered.output, format!("{}{}", EMPTY_STYLE, doc));
        assert_eq!(rendered.matched_count, 0);
    }

    #[test]
    fn test_rules_become_hr() {
        let index = RecordIndex::default();
        let rendered = render_with_index(&index, "a\n---\nb\n-----\nc", &RenderConfig::default());
        assert_eq!(
            rendered.output,
            format!("{}a\n<hr>\nb\n<hr>\nc", EMPTY_STYLE)
        );
    }

    #[test]
    fn test_only_matching_segments_replaced() {
        let index = RecordIndex::build(vec![
            Record::new_highlight(3, "/4/2/6", "quoted text").with_color("blue"),
        ]);
        let doc = format!(
            "{}\n---\nuntouched {}\n",
            link("%2F8%2F4%2F2%2F6"),
            link("%2F2%2F2")
        );
        let rendered = render_with_index(&index, &doc, &RenderConfig::default());

        assert_eq!(rendered.matched_count, 1);
        assert_eq!(rendered.unresolved_locators, vec!["/2/2".to_string()]);
        assert!(rendered.output.contains("<blockquote class=\"bq-blue\">"));
        assert!(rendered.output.contains(&format!("\n<hr>\nuntouched {}\n", link("%2F2%2F2"))));
        assert!(rendered.output.contains(".bq-blue {"));
    }

    #[test]
    fn test_undecodable_locator_passes_through() {
        let index = RecordIndex::build(vec![Record::new_highlight(0, "/2", "a")]);
        let doc = format!("{}\n---\n{}\n", link("%FF%FE"), link("%2F2%2F2"));
        let rendered = render_with_index(&index, &doc, &RenderConfig::default());

        assert_eq!(rendered.matched_count, 1);
        assert!(rendered.unresolved_locators.is_empty());
        assert!(rendered
            .output
            .contains(&format!("</style>\n\n{}\n<hr>\n<blockquote", link("%FF%FE"))));
    }

    #[test]
    fn test_stylesheet_only_for_matched_colors() {
        let index = RecordIndex::build(vec![
            Record::new_highlight(0, "/2", "a").with_color("red"),
            Record::new_highlight(1, "/2", "b").with_color("green"),
        ]);
        let doc = link("%2F2%2F2");
        let rendered = render_with_index(&index, &doc, &RenderConfig::default());

        assert!(rendered.output.contains(".bq-red {"));
        assert!(!rendered.output.contains(".bq-green"));
    }

    #[test]
    fn test_default_color_when_no_record_has_style() {
        let index = RecordIndex::build(vec![Record::new_highlight(0, "/2", "a")]);
        let rendered = render_with_index(&index, &link("%2F2%2F2"), &RenderConfig::default());

        assert!(rendered.output.contains(".bq-default {"));
        assert_eq!(rendered.output.matches(" {\n  border-left").count(), 1);
    }

    #[test]
    fn test_default_color_without_matches() {
        let index = RecordIndex::build(vec![Record::new_highlight(0, "/2", "a")]);
        let rendered = render_with_index(&index, "no links", &RenderConfig::default());
        assert!(rendered.output.contains(".bq-default {"));
    }

    #[test]
    fn test_no_default_color_for_empty_index() {
        let rendered =
            render_with_index(&RecordIndex::default(), "no links", &RenderConfig::default());
        assert!(rendered.output.starts_with(EMPTY_STYLE));
    }

    #[test]
    fn test_malformed_export_aborts() {
        assert!(format_annotations("", "doc").is_err());
        assert!(format_annotations("{", "doc").is_err());
        assert!(format_annotations("{}", "doc").is_err());
    }
}
