//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Base URL must be an http(s) origin without path, query or fragment
//! - Timeout must be non-zero
//! - Prefix must be a rooted path without a trailing slash
//! - Default headers must be valid HTTP header names and values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PortalConfig → Result<(), Vec<ValidationError>>
//! - The API section hands back its parsed default headers, so they are parsed once

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::schema::{ApiConfig, PortalConfig};

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("api.base_url '{0}' is not a valid URL")]
    InvalidBaseUrl(String),

    #[error("api.base_url '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("api.base_url '{0}' must be an origin (no path, query or fragment)")]
    NotAnOrigin(String),

    #[error("api.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("api.prefix '{0}' must start with '/' and must not end with '/'")]
    InvalidPrefix(String),

    #[error("api.default_headers: invalid header '{0}'")]
    InvalidHeader(String),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Validate a complete portal configuration.
pub fn validate_config(config: &PortalConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_api(&config.api).err().unwrap_or_default();

    let level = config.observability.log_level.to_ascii_lowercase();
    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the API client section on its own.
///
/// On success returns `default_headers` as a ready-to-use header map.
pub fn validate_api(api: &ApiConfig) -> Result<HeaderMap, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = validate_origin(&api.base_url) {
        errors.push(e);
    }

    if api.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if !api.prefix.starts_with('/') || (api.prefix.len() > 1 && api.prefix.ends_with('/')) {
        errors.push(ValidationError::InvalidPrefix(api.prefix.clone()));
    }

    let mut headers = HeaderMap::new();
    for (name, value) in &api.default_headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => errors.push(ValidationError::InvalidHeader(name.clone())),
        }
    }

    if errors.is_empty() {
        Ok(headers)
    } else {
        Err(errors)
    }
}

fn validate_origin(base_url: &str) -> Result<(), ValidationError> {
    let url =
        Url::parse(base_url).map_err(|_| ValidationError::InvalidBaseUrl(base_url.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme(base_url.to_string()));
    }

    if url.host_str().is_none()
        || url.path().trim_end_matches('/') != ""
        || url.query().is_some()
        || url.fragment().is_some()
    {
        return Err(ValidationError::NotAnOrigin(base_url.to_string()));
    }

    Ok(())
}
