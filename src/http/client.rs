//! Backend API client.
//!
//! # Responsibilities
//! - Root relative paths under the API prefix and join them with the base URL
//! - Dispatch through a shared reqwest client with the configured timeout
//! - Log every request before dispatch and its outcome afterwards
//! - Hand errors back unchanged (no retry, no fallback)

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::schema::ApiConfig;
use crate::config::validation::validate_api;
use crate::http::error::{ApiError, ApiResult};
use crate::http::path::{is_absolute_url, normalize_path_with_prefix};
use crate::http::request::{Payload, RequestId, RequestOptions, X_REQUEST_ID};
use crate::http::response::ApiResponse;

/// HTTP client for the patient-records backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    prefix: String,
    timeout: Duration,
}

impl ApiClient {
    /// Build a client from validated configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let default_headers = validate_api(config).map_err(|errors| {
            let reasons: Vec<String> = errors.iter().map(ToString::to_string).collect();
            ApiError::Config(reasons.join(", "))
        })?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        tracing::debug!(
            base_url = %base_url,
            prefix = %config.prefix,
            timeout_ms = config.timeout_ms,
            "API client initialized"
        );

        Ok(Self {
            http,
            base_url,
            prefix: config.prefix.clone(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Normalize a request path against this client's prefix.
    pub fn normalize(&self, path: &str) -> String {
        normalize_path_with_prefix(path, &self.prefix)
    }

    /// The URL a request for `path` is sent to (without query parameters).
    pub fn full_url(&self, path: &str) -> String {
        let normalized = self.normalize(path);
        if is_absolute_url(&normalized) {
            normalized
        } else {
            format!("{}{}", self.base_url, normalized)
        }
    }

    /// Send a request and buffer the response.
    ///
    /// Non-2xx answers become [`ApiError::Status`] carrying the body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<Payload>,
        options: RequestOptions,
    ) -> ApiResult<ApiResponse> {
        let request_id = RequestId::new();
        let full_url = self.full_url(path);

        let builder = match self.build(&method, &full_url, &request_id, payload, &options) {
            Ok(builder) => builder,
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    method = %method,
                    url = %full_url,
                    error = %e,
                    "Request error"
                );
                return Err(e);
            }
        };

        tracing::info!(
            request_id = %request_id,
            method = %method,
            url = %full_url,
            "Dispatching request"
        );

        let response = match builder.send().await {
            Ok(response) => response,
            Err(source) => {
                tracing::error!(
                    request_id = %request_id,
                    url = %full_url,
                    timeout = source.is_timeout(),
                    error = %source,
                    "Response error"
                );
                return Err(ApiError::Transport {
                    url: full_url,
                    source,
                });
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(source) => {
                tracing::error!(
                    request_id = %request_id,
                    status = status.as_u16(),
                    url = %full_url,
                    error = %source,
                    "Response error"
                );
                return Err(ApiError::Transport {
                    url: full_url,
                    source,
                });
            }
        };

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            tracing::error!(
                request_id = %request_id,
                status = status.as_u16(),
                url = %full_url,
                "Response error"
            );
            if !body.is_empty() {
                tracing::error!(request_id = %request_id, details = %body, "Error details");
            }
            return Err(ApiError::Status {
                status,
                url: full_url,
                body,
            });
        }

        tracing::info!(
            request_id = %request_id,
            status = status.as_u16(),
            url = %full_url,
            "Response received"
        );

        Ok(ApiResponse::new(request_id, status, full_url, headers, body))
    }

    fn build(
        &self,
        method: &Method,
        full_url: &str,
        request_id: &RequestId,
        payload: Option<Payload>,
        options: &RequestOptions,
    ) -> ApiResult<reqwest::RequestBuilder> {
        let url = Url::parse(full_url).map_err(|e| ApiError::Build {
            url: full_url.to_string(),
            reason: e.to_string(),
        })?;
        let extra_headers = options.header_map(full_url)?;

        let mut builder = self
            .http
            .request(method.clone(), url)
            .header(X_REQUEST_ID, request_id.to_string())
            .headers(extra_headers);

        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(payload) = payload {
            builder = payload.apply(builder);
        }
        Ok(builder)
    }

    pub async fn get(&self, path: &str) -> ApiResult<ApiResponse> {
        self.request(Method::GET, path, None, RequestOptions::default())
            .await
    }

    pub async fn get_with(&self, path: &str, options: RequestOptions) -> ApiResult<ApiResponse> {
        self.request(Method::GET, path, None, options).await
    }

    /// GET and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.get(path).await?.json()
    }

    pub async fn post(&self, path: &str, payload: Payload) -> ApiResult<ApiResponse> {
        self.request(Method::POST, path, Some(payload), RequestOptions::default())
            .await
    }

    pub async fn put(&self, path: &str, payload: Payload) -> ApiResult<ApiResponse> {
        self.request(Method::PUT, path, Some(payload), RequestOptions::default())
            .await
    }

    pub async fn patch(&self, path: &str, payload: Payload) -> ApiResult<ApiResponse> {
        self.request(Method::PATCH, path, Some(payload), RequestOptions::default())
            .await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<ApiResponse> {
        self.request(Method::DELETE, path, None, RequestOptions::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig::with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_full_url_joins_base_and_prefix() {
        let c = client("https://localhost:7048");
        assert_eq!(c.full_url("pacijenti"), "https://localhost:7048/api/pacijenti");
        assert_eq!(
            c.full_url("/api/pacijenti/5"),
            "https://localhost:7048/api/pacijenti/5"
        );
        assert_eq!(c.full_url("https://other.host/x"), "https://other.host/x");
    }

    #[test]
    fn test_trailing_slash_on_base_is_dropped() {
        let c = client("http://127.0.0.1:9000/");
        assert_eq!(c.base_url(), "http://127.0.0.1:9000");
        assert_eq!(c.full_url("x"), "http://127.0.0.1:9000/api/x");
    }

    #[test]
    fn test_custom_prefix() {
        let mut config = ApiConfig::with_base_url("http://h");
        config.prefix = "/v2".into();
        let c = ApiClient::new(&config).unwrap();
        assert_eq!(c.full_url("recepti"), "http://h/v2/recepti");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = ApiClient::new(&ApiConfig::with_base_url("localhost:7048")).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        let mut config = ApiConfig::default();
        config.timeout_ms = 0;
        assert!(matches!(ApiClient::new(&config), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_invalid_default_header_is_config_error() {
        let mut config = ApiConfig::default();
        config.default_headers.insert("bad header".into(), "1".into());
        match ApiClient::new(&config).unwrap_err() {
            ApiError::Config(reason) => assert!(reason.contains("bad header"), "{reason}"),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_timeout_from_config() {
        let mut config = ApiConfig::default();
        config.timeout_ms = 1234;
        let c = ApiClient::new(&config).unwrap();
        assert_eq!(c.timeout(), Duration::from_millis(1234));
    }

    #[tokio::test]
    async fn test_build_error_is_returned_before_dispatch() {
        let c = client("http://127.0.0.1:9");
        let err = c
            .request(
                Method::GET,
                "pacijenti",
                None,
                RequestOptions::new().header("bad header", "1"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Build { .. }));
        assert_eq!(err.status(), None);
    }
}
