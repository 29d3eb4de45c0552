//! Style block for the callout classes in use

use std::collections::BTreeSet;

use crate::color::{sanitize_color, Palette};

const HEADER_COMMENT: &str = "/* Calibre Annotation Styles */";

/// Generate the `<style>` block for a set of color tokens.
///
/// Tokens are sanitized first; tokens that sanitize to nothing are skipped.
/// Rules are emitted in ascending order of the sanitized token. The block ends
/// with a blank line so the document can be appended directly.
pub fn generate_stylesheet<'a, I>(tokens: I, class_prefix: &str, palette: &Palette) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let sanitized: BTreeSet<String> = tokens
        .into_iter()
        .map(sanitize_color)
        .filter(|token| !token.is_empty())
        .collect();

    let mut lines = vec!["<style>".to_string(), HEADER_COMMENT.to_string()];
    for token in &sanitized {
        let class = format!(".{}-{}", class_prefix, token);
        let swatch = palette.swatch(token);
        lines.extend([
            format!("{} {{", class),
            format!("  border-left: 3px solid {} !important;", swatch.border),
            "  padding: 0.5em 10px;".to_string(),
            "  margin: 1em 0;".to_string(),
            format!("  background-color: {};", swatch.background),
            "  border-radius: 4px;".to_string(),
            "}".to_string(),
            format!("{} a {{", class),
            format!("  color: {};", swatch.link),
            "  font-weight: bold;".to_string(),
            "}".to_string(),
            format!("{} em {{", class),
            "  font-style: italic;".to_string(),
            "  font-weight: bold;".to_string(),
            format!("  color: {};", swatch.link),
            "}".to_string(),
        ]);
    }
    lines.push("</style>\n".to_string());

    let mut stylesheet = lines.join("\n");
    stylesheet.push('\n');
    stylesheet
}
