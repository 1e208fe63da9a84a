//! Error types for the catalog API client.
//!
//! # Design
//! Only two things can go wrong from a caller's point of view: the call was
//! malformed before any I/O happened, or the network round-trip failed. HTTP
//! status codes are not errors here. A 404 page is still a response and is
//! handed back as `ApiResult::Text`.

/// Errors returned by `SpigetClient`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required argument (id, version, search term, path) was empty.
    /// Raised before any network I/O.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// A path argument of `.` or `..`, which URL normalization would fold
    /// into a different endpoint. Raised before any network I/O.
    #[error("argument is not a valid path segment: {0}")]
    InvalidArgument(&'static str),

    /// The `ClientConfig` cannot produce a usable client.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection refused, DNS failure, reset while reading the body, etc.
    #[error("transport error: {0}")]
    Transport(String),

    /// Callback delivery needs a tokio runtime to spawn onto.
    #[error("no tokio runtime available to run the request")]
    NoRuntime,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
