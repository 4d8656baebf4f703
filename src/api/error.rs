//! API Error Types
//!
//! Errors that can occur while fetching data from the statistics backend.

use thiserror::Error;

/// Errors returned by backend fetches
#[derive(Error, Debug)]
pub enum FetchError {
    /// Backend could not be reached (connection refused, DNS failure)
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Transport-level failure other than connect/timeout
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl FetchError {
    /// Whether the backend answered, but not with a success status
    pub fn is_status(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Unavailable(e.to_string())
        } else {
            FetchError::Network(e)
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

/// Result type for backend fetches
pub type FetchResult<T> = Result<T, FetchError>;
