//! Error types for metascore library.

use std::io;
use thiserror::Error;

/// Result type alias for metascore operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, extracting or rendering leaderboards.
///
/// Missing tables, unresolved columns and unparsable cells are not errors:
/// extraction degrades to an empty result instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is neither HTML nor Markdown.
    #[error("Unknown document format: {0}")]
    UnknownFormat(String),

    /// No cached snapshot exists for the requested source.
    #[error("No snapshot found for '{0}'")]
    SnapshotNotFound(String),

    /// A leaderboard source definition is unusable.
    #[error("Invalid source '{label}': {reason}")]
    InvalidSource {
        /// Source label
        label: String,
        /// What is wrong with it
        reason: String,
    },

    /// Error during rendering (text, Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::SnapshotNotFound("lmarena-general".into());
        assert_eq!(err.to_string(), "No snapshot found for 'lmarena-general'");

        let err = Error::InvalidSource {
            label: "arena".into(),
            reason: "empty locator".into(),
        };
        assert_eq!(err.to_string(), "Invalid source 'arena': empty locator");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Render(_)));
        assert!(err.to_string().starts_with("Rendering error: JSON serialization error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
