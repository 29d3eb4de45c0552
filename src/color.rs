//! Color tokens and the palette used to style callouts
//!
//! Calibre stores a highlight color as a free-form token (`style.which`), usually
//! one of its named highlighter colors. Tokens end up inside CSS class names, so
//! they are sanitized before use.

use std::collections::BTreeMap;

use crate::error::{FormatError, Result};

/// Token used when a record carries no color, or one that sanitizes to nothing
pub const DEFAULT_TOKEN: &str = "default";

/// Strip everything outside `[A-Za-z0-9-]`.
pub fn sanitize_color(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

/// Sanitized token for a class name, falling back to [`DEFAULT_TOKEN`].
pub fn class_token(token: Option<&str>) -> String {
    match token.map(sanitize_color) {
        Some(sanitized) if !sanitized.is_empty() => sanitized,
        _ => DEFAULT_TOKEN.to_string(),
    }
}

/// Colors for one palette entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    pub border: String,
    pub background: String,
    pub link: String,
}

impl ColorEntry {
    fn new(border: &str, background: &str, link: &str) -> Self {
        Self {
            border: border.to_string(),
            background: background.to_string(),
            link: link.to_string(),
        }
    }
}

/// Resolved colors for a sanitized token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch<'a> {
    pub border: &'a str,
    pub background: &'a str,
    pub link: &'a str,
}

/// Immutable token -> colors table
///
/// Tokens missing from the table get the fallback background and link color,
/// and use the token itself as the border color.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: BTreeMap<String, ColorEntry>,
    fallback_background: String,
    fallback_link: String,
}

impl Palette {
    /// The table matching Calibre's highlighter colors
    pub fn calibre() -> Self {
        let entries = [
            ("yellow", ColorEntry::new("yellow", "#fff9c4", "#795548")),
            ("blue", ColorEntry::new("blue", "#e3f2fd", "#0d47a1")),
            ("green", ColorEntry::new("green", "#e8f5e9", "#1b5e20")),
            ("red", ColorEntry::new("red", "#ffebee", "#b71c1c")),
            (DEFAULT_TOKEN, ColorEntry::new("#cccccc", "#f9f9f9", "#333333")),
        ]
        .into_iter()
        .map(|(token, entry)| (token.to_string(), entry))
        .collect();

        Self {
            entries,
            fallback_background: "#f5f5f5".to_string(),
            fallback_link: "#333333".to_string(),
        }
    }

    /// Build a palette with an extra or replaced entry
    pub fn with_entry(mut self, token: impl Into<String>, entry: ColorEntry) -> Self {
        self.entries.insert(token.into(), entry);
        self
    }

    /// Look up the colors for an already-sanitized token
    pub fn swatch<'a>(&'a self, token: &'a str) -> Swatch<'a> {
        match self.entries.get(token) {
            Some(entry) => Swatch {
                border: &entry.border,
                background: &entry.background,
                link: &entry.link,
            },
            None => Swatch {
                border: token,
                background: &self.fallback_background,
                link: &self.fallback_link,
            },
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::calibre()
    }
}

fn parse_hex(hex_color: &str) -> Result<[u8; 3]> {
    let digits = hex_color.trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(FormatError::InvalidColor(hex_color.to_string())),
    };

    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let pair = expanded
            .get(i * 2..i * 2 + 2)
            .ok_or_else(|| FormatError::InvalidColor(hex_color.to_string()))?;
        *channel = u8::from_str_radix(pair, 16)
            .map_err(|_| FormatError::InvalidColor(hex_color.to_string()))?;
    }
    Ok(rgb)
}

fn format_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Invert every channel of a hex color.
pub fn contrasting(hex_color: &str) -> Result<String> {
    let rgb = parse_hex(hex_color)?;
    Ok(format_hex(rgb.map(|c| 255 - c)))
}

/// Move a hex color towards white. `factor` is clamped to `0.0..=1.0`,
/// where `1.0` yields white.
pub fn lighten(hex_color: &str, factor: f64) -> Result<String> {
    let factor = factor.clamp(0.0, 1.0);
    let rgb = parse_hex(hex_color)?;
    Ok(format_hex(
        rgb.map(|c| (f64::from(c) + (255.0 - f64::from(c)) * factor) as u8),
    ))
}

/// Append an alpha channel, producing `#rrggbbaa`.
pub fn with_opacity(hex_color: &str, opacity: f64) -> Result<String> {
    let rgb = parse_hex(hex_color)?;
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Ok(format!("{}{:02x}", format_hex(rgb), alpha))
}
