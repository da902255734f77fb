//! Buffered backend responses.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::http::error::{ApiError, ApiResult};
use crate::http::request::RequestId;

/// A successful (2xx) response with its body read into memory.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    request_id: RequestId,
    status: StatusCode,
    url: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    pub(crate) fn new(
        request_id: RequestId,
        status: StatusCode,
        url: String,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Self {
        Self {
            request_id,
            status,
            url,
            headers,
            body,
        }
    }

    /// ID sent as `x-request-id` with the request that produced this response.
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Full URL the request was sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as text; invalid UTF-8 is replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the JSON body. An empty body decodes as JSON `null`.
    ///
    /// A body that does not fit `T` is logged as `Decode error`.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let body: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(body).map_err(|source| {
            tracing::error!(
                request_id = %self.request_id,
                status = self.status.as_u16(),
                url = %self.url,
                error = %source,
                "Decode error"
            );
            ApiError::Decode {
                url: self.url.clone(),
                source,
            }
        })
    }
}
