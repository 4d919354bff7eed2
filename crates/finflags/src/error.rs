//! Error types for finflags.
//!
//! A failed submit is reported through these types, but the page itself only
//! logs it: see [`crate::session::Session::submit`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for finflags operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Upload Errors ===
    /// The upload request failed at the transport level (DNS, connect, TLS,
    /// or reading the response body).
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body, or a saved response file, is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Evaluation Errors ===
    /// Offline rule evaluation failed.
    #[error("rule evaluation failed: {0}")]
    Rules(#[from] finflags_rules::RulesError),

    // === I/O Errors ===
    /// A local file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for finflags operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a file read error for `path`.
    #[must_use]
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Check if this error is a network failure.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    /// Check if this error is a malformed (non-JSON) response body.
    #[must_use]
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("<html>").unwrap_err()
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_from_json_error() {
        let err: Error = json_error().into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.is_invalid_response());
        assert!(!err.is_network());
        assert!(err.to_string().starts_with("invalid JSON"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("pipe closed"));
        assert!(!err.is_network());
    }

    #[test]
    fn test_read_file_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err = Error::read_file("/tmp/report.json", io_err);
        let msg = err.to_string();
        assert!(msg.contains("/tmp/report.json"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "bad url".to_string(),
        };
        assert_eq!(err.to_string(), "invalid configuration: bad url");
    }

    #[test]
    fn test_from_rules_error() {
        let err: Error = finflags_rules::RulesError::NoFinancials.into();
        assert!(matches!(err, Error::Rules(_)));
        assert!(err.to_string().contains("no financial entries"));
    }

    #[test]
    fn test_from_figment_error() {
        let err: Error = figment::Error::from("boom".to_string()).into();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }
}
