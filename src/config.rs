use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::errors::PipelineError;

pub const DEFAULT_DOC_TAG: &str = "doc";
pub const DEFAULT_PLOT_DIR: &str = "./plots";

/// Run defaults loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// flags override anything set here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Tag name that delimits documents in the markup file (WORDFREQ_DOC_TAG)
    pub doc_tag: String,
    /// Directory the fit plots are written to (WORDFREQ_PLOT_DIR)
    pub plot_dir: PathBuf,
    /// Drop English stop words after normalization (WORDFREQ_DROP_STOP_WORDS)
    pub drop_stop_words: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            doc_tag: DEFAULT_DOC_TAG.to_string(),
            plot_dir: PathBuf::from(DEFAULT_PLOT_DIR),
            drop_stop_words: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables. Unset variables fall
    /// back to the defaults.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let drop_stop_words = match env::var("WORDFREQ_DROP_STOP_WORDS") {
            Ok(value) => parse_flag(&value).ok_or_else(|| {
                anyhow::anyhow!(
                    "WORDFREQ_DROP_STOP_WORDS must be true/false, 1/0 or yes/no (got {value:?})"
                )
            })?,
            Err(_) => defaults.drop_stop_words,
        };

        Ok(Self {
            doc_tag: env::var("WORDFREQ_DOC_TAG")
                .ok()
                .filter(|tag| !tag.trim().is_empty())
                .unwrap_or(defaults.doc_tag),
            plot_dir: env::var("WORDFREQ_PLOT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.plot_dir),
            drop_stop_words,
        })
    }

    /// Check that the input path names a readable file.
    /// Call this before any processing so a bad path fails fast.
    pub fn require_input(&self, path: &Path) -> std::result::Result<(), PipelineError> {
        if !path.exists() {
            return Err(PipelineError::Input {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }
        if !path.is_file() {
            return Err(PipelineError::Input {
                path: path.to_path_buf(),
                reason: "not a regular file".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn missing_input_is_an_input_error() {
        let config = Config::default();
        let err = config
            .require_input(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Input { .. }));

        let dir = std::env::temp_dir();
        assert!(config.require_input(&dir).is_err());
    }
}
