//! Fetch error types.

use thiserror::Error;

/// Errors that can occur when talking to an upstream API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, reset).
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The URL could not be built or parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The upstream answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The body was not what we expected.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Request timed out")]
    Timeout,

    /// Serializing a request body failed.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// Upstream status, if there was a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}
