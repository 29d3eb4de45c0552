//! Configuration management for Calibre Callouts

use serde::Deserialize;
use std::env;

use crate::color::{sanitize_color, Palette};
use crate::error::{FormatError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings that shape the generated HTML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Class prefix for callouts; a yellow highlight becomes `<prefix>-yellow`
    pub class_prefix: String,
    /// Colors per highlighter token
    #[serde(skip)]
    pub palette: Palette,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Extension forced on written output files
    pub extension: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            class_prefix: "bq".to_string(),
            palette: Palette::calibre(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            extension: "html".to_string(),
        }
    }
}

impl RenderConfig {
    /// Reject prefixes that would not survive as a CSS class name
    pub fn validate(&self) -> Result<()> {
        if self.class_prefix.is_empty() || sanitize_color(&self.class_prefix) != self.class_prefix {
            return Err(FormatError::Config(format!(
                "class prefix must be non-empty and use only [A-Za-z0-9-]: {:?}",
                self.class_prefix
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();
        let config = Config {
            render: RenderConfig {
                class_prefix: env::var("CALLOUTS_CLASS_PREFIX")
                    .unwrap_or(defaults.render.class_prefix),
                palette: defaults.render.palette,
            },
            output: OutputConfig {
                extension: env::var("CALLOUTS_OUTPUT_EXTENSION")
                    .map(|ext| ext.trim_start_matches('.').to_string())
                    .unwrap_or(defaults.output.extension),
            },
        };

        config.render.validate()?;
        if config.output.extension.is_empty() {
            return Err(FormatError::Config(
                "output extension must not be empty".to_string(),
            ));
        }
        Ok(config)
    }
}
