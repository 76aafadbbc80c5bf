//! Crate error types.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Controller has been torn down")]
    TornDown,

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A failed market fetch.
///
/// Never escapes the poller's fetch boundary: it is logged and recorded as a
/// transient failure notice while the last good list stays visible.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Invalid payload: {0}")]
    Validation(String),

    #[error("{0}")]
    Source(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HttpError {
    /// Map a non-success status code and its body to an error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => HttpError::NotFound(body),
            429 => HttpError::RateLimited,
            400..=499 => HttpError::BadRequest(body),
            _ => HttpError::ServerError { status, body },
        }
    }
}
