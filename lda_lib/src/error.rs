//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding export, download and input validation failures.
#[derive(Debug)]
pub enum LdaError {
    /// An error from the underlying API client.
    Api(lda_api::Error),
    /// A record lacks the identifier an operation needs (e.g. `filing_uuid`).
    MissingIdentifier(String),
    /// Reading or writing a local file failed.
    Io(std::io::Error),
    /// Writing CSV output failed.
    Csv(csv::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for LdaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::MissingIdentifier(msg) => write!(f, "Missing identifier: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Csv(e) => write!(f, "CSV error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for LdaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<lda_api::Error> for LdaError {
    fn from(e: lda_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<std::io::Error> for LdaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for LdaError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<serde_json::Error> for LdaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
