//! Error types for the API client.

use std::time::Duration;

/// Errors that can occur when building or sending API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client was constructed without an API token.
    #[error("API token is required")]
    MissingToken,
    /// Both the initial attempt and its single retry timed out.
    #[error("Request to {url} timed out after {} seconds", timeout.as_secs_f64())]
    Timeout { url: String, timeout: Duration },
    /// The API returned a non-success status with the raw body text.
    #[error("Request failed: {status} {body}")]
    HttpStatus { status: u16, body: String },
    /// The query violates a rule the API enforces, caught before any request is sent.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// An HTTP request failed for a reason other than a timeout or a bad status.
    #[error("Request failed")]
    RequestFailed,
    /// The response body could not be parsed into the expected shape.
    #[error("Failed to parse response: {0}")]
    Deserialize(String),
}
