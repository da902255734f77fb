//! HTTP client subsystem.
//!
//! # Data Flow
//! ```text
//! caller (view, CLI) with relative path + optional payload
//!     → path.rs (root under /api unless absolute or already rooted)
//!     → client.rs (join base URL, attach request ID, log, dispatch)
//!     → response.rs (buffered 2xx response)
//!       or error.rs (build / transport / status error, logged then returned)
//! ```
//!
//! # Design Decisions
//! - Stateless pass-through: no retry, no backoff, no deduplication
//! - The only deadline is the configured per-request timeout
//! - Client is constructed from an explicit `ApiConfig`, never a global

pub mod client;
pub mod error;
pub mod path;
pub mod request;
pub mod response;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use path::{normalize_path, normalize_path_with_prefix};
pub use request::{Payload, RequestId, RequestOptions, X_REQUEST_ID};
pub use response::ApiResponse;
