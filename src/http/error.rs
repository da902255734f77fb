//! Error types for the API client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by [`ApiClient`](crate::http::ApiClient).
///
/// None of these are recovered from locally: each is logged once and then
/// handed back to the caller as-is.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The client configuration is unusable.
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// Caller input was rejected before any URL was formed.
    #[error("invalid request input: {0}")]
    InvalidInput(String),

    /// The request could not be built (bad URL, bad header, ...).
    #[error("failed to build request for {url}: {reason}")]
    Build { url: String, reason: String },

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status {
        status: StatusCode,
        url: String,
        body: String,
    },

    /// The response body did not deserialize into the requested type.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Status code, when the backend produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a non-2xx answer.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Full URL the failed request targeted, if it got that far.
    pub fn url(&self) -> Option<&str> {
        match self {
            ApiError::Build { url, .. }
            | ApiError::Transport { url, .. }
            | ApiError::Status { url, .. }
            | ApiError::Decode { url, .. } => Some(url.as_str()),
            ApiError::Config(_) | ApiError::InvalidInput(_) => None,
        }
    }

    /// True when the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport { source, .. } if source.is_timeout())
    }
}

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;
