//! Error types for Calibre Callouts

use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors surfaced to callers.
///
/// Only input that cannot be interpreted at all is fatal. Per-segment problems
/// (no link, undecodable locator, unknown locator) never reach this type; those
/// segments are passed through unchanged.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Annotation export is empty, not JSON, or has no annotation array
    #[error("{0}")]
    MalformedInput(String),

    /// Hex color helper received something that is not `#rgb` or `#rrggbb`
    #[error("Invalid hex color: {0}")]
    InvalidColor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        FormatError::MalformedInput(message.into())
    }
}
