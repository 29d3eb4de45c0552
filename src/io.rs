//! Reading inputs and persisting output
//!
//! Inputs may be given either as file paths or as the content itself. Output
//! files always get the configured extension.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Resolve an argument to text: the contents of the file it names, or the
/// argument itself when it contains a newline or names no existing file.
/// A leading byte-order mark is removed either way.
pub fn read_input(arg: &str) -> Result<String> {
    let content = if arg.contains('\n') || !Path::new(arg).is_file() {
        arg.to_string()
    } else {
        tracing::debug!("Reading input file {}", arg);
        fs::read_to_string(arg)?
    };

    Ok(match content.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

/// Replace the extension of `path` unless it already matches `extension`
/// (compared case-insensitively).
pub fn output_path(path: &Path, extension: &str) -> PathBuf {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

    if matches {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

/// Write `content` under `path` (extension coerced), creating parent
/// directories. Returns the path actually written.
pub fn write_output(path: &Path, content: &str, extension: &str) -> Result<PathBuf> {
    let target = output_path(path, extension);
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, content)?;
    tracing::info!("Output written to {}", target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_coercion() {
        assert_eq!(
            output_path(Path::new("out/final.md"), "html"),
            PathBuf::from("out/final.html")
        );
        assert_eq!(
            output_path(Path::new("out/final"), "html"),
            PathBuf::from("out/final.html")
        );
        assert_eq!(
            output_path(Path::new("final.HTML"), "html"),
            PathBuf::from("final.HTML")
        );
    }

    #[test]
    fn test_inline_content_is_returned() {
        assert_eq!(read_input("{\"a\": 1}\n").unwrap(), "{\"a\": 1}\n");
        assert_eq!(
            read_input("definitely/not/a/real/file.json").unwrap(),
            "definitely/not/a/real/file.json"
        );
    }

    #[test]
    fn test_inline_bom_stripped() {
        assert_eq!(read_input("\u{feff}{}\n").unwrap(), "{}\n");
    }
}
