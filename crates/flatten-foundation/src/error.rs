//! Error handling for the flatten-imports workspace

use std::path::Path;
use thiserror::Error;

/// Error type used throughout the flatten-imports crates
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FlattenError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error on {path}: {message}")]
    Io {
        message: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error{}: {message}", .file.as_ref().map(|f| format!(" in {f}")).unwrap_or_default())]
    Parse {
        message: String,
        file: Option<String>,
    },

    #[error("Edit error: {message}")]
    Edit { message: String },
}

impl FlattenError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error tied to a specific path
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            message: source.to_string(),
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a new parse error, optionally naming the file
    pub fn parse(message: impl Into<String>, file: Option<&Path>) -> Self {
        Self::Parse {
            message: message.into(),
            file: file.map(|f| f.display().to_string()),
        }
    }

    /// Create a new edit application error
    pub fn edit(message: impl Into<String>) -> Self {
        Self::Edit {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type FlattenResult<T> = Result<T, FlattenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_includes_path() {
        let err = FlattenError::io(
            Path::new("src/app.ts"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error on src/app.ts: denied");
    }

    #[test]
    fn parse_error_without_file() {
        let err = FlattenError::parse("Unexpected token", None);
        assert_eq!(err.to_string(), "Parse error: Unexpected token");
    }
}
