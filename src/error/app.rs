//! Application-level errors for the binary.

use super::LastfmError;

/// Errors surfaced by the CLI entry point.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    /// Last.fm API error.
    #[error("last.fm error: {0}")]
    Lastfm(#[from] LastfmError),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AppError::Io(io_err);
        assert!(err.to_string().contains("io error"));
    }

    #[test]
    fn test_error_chain() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let app_err = AppError::Io(io_err);
        assert!(app_err.source().is_some());
    }
}
