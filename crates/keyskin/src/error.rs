//! Error types for theme resolution.
//!
//! Only structural misconfiguration and document loading surface as errors.
//! Malformed literals and missing keys are recovered locally and logged.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when activating a theme or resolving against it.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The color scheme set has no `default` entry.
    #[error("the color scheme set has no 'default' scheme")]
    MissingDefaultScheme,

    /// The preset keyboard set has no `default` entry.
    #[error("the default keyboard definition is missing")]
    MissingDefaultKeyboard,

    /// The theme document could not be parsed or has a malformed section.
    #[error("{}", parse_message(path.as_ref(), message))]
    Parse {
        /// Source file, when the document came from disk.
        path: Option<PathBuf>,
        /// What went wrong.
        message: String,
    },

    /// Loading failed for a reason other than parsing.
    #[error("failed to load theme: {message}")]
    Load { message: String },

    /// No theme file with this name exists in any registered directory.
    #[error("theme '{name}' not found")]
    NotFound { name: String },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn parse_message(path: Option<&PathBuf>, message: &str) -> String {
    match path {
        Some(p) => format!("failed to parse theme {}: {}", p.display(), message),
        None => format!("failed to parse theme: {}", message),
    }
}

impl ThemeError {
    /// Create a parse error without a source path.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            path: None,
            message: message.into(),
        }
    }

    /// Attach a source path to a parse error. Other variants pass through.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Parse { message, .. } => Self::Parse {
                path: Some(path.into()),
                message,
            },
            other => other,
        }
    }
}

/// Result type for theme operations.
pub type Result<T> = std::result::Result<T, ThemeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_without_path() {
        let err = ThemeError::parse("bad indent");
        assert_eq!(err.to_string(), "failed to parse theme: bad indent");
    }

    #[test]
    fn test_parse_error_display_with_path() {
        let err = ThemeError::parse("bad indent").with_path("/tmp/t.yaml");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/t.yaml"));
        assert!(msg.contains("bad indent"));
    }

    #[test]
    fn test_with_path_ignores_other_variants() {
        let err = ThemeError::MissingDefaultScheme.with_path("/tmp/t.yaml");
        assert!(matches!(err, ThemeError::MissingDefaultScheme));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ThemeError = io_err.into();
        assert!(matches!(err, ThemeError::Io(_)));
    }
}
