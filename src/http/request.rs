//! Request payloads and per-call options.
//!
//! # Design Decisions
//! - No global `Content-Type`: the payload decides it per request
//! - Every request gets an `x-request-id` for log correlation

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde::Serialize;
use uuid::Uuid;

use crate::http::error::{ApiError, ApiResult};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Unique identifier for a single outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a new random request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body sent with a request.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Serialized as JSON with `application/json`.
    Json(serde_json::Value),
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
    /// Sent verbatim with the given content type.
    Bytes {
        content_type: String,
        data: Vec<u8>,
    },
}

impl Payload {
    /// JSON payload from any serializable value.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> ApiResult<Self> {
        serde_json::to_value(value)
            .map(Payload::Json)
            .map_err(|e| ApiError::InvalidInput(format!("payload is not serializable: {e}")))
    }

    pub(crate) fn apply(self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Payload::Json(value) => builder.json(&value),
            Payload::Form(fields) => builder.form(&fields),
            Payload::Bytes { content_type, data } => {
                builder.header(CONTENT_TYPE, content_type).body(data)
            }
        }
    }
}

/// Per-call options layered on top of the client defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers; these win over the configured defaults.
    pub headers: Vec<(String, String)>,
    /// Query string parameters appended to the URL.
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Validate and convert the extra headers.
    pub(crate) fn header_map(&self, url: &str) -> ApiResult<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::Build {
                    url: url.to_string(),
                    reason: format!("invalid header name '{name}': {e}"),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| ApiError::Build {
                url: url.to_string(),
                reason: format!("invalid value for header '{name}': {e}"),
            })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}
