//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → loader.rs (optional TOML file)
//!     → API_BASE_URL env / --api-base-url flag (base URL override)
//!     → validation.rs (semantic checks)
//!     → PortalConfig (validated, immutable)
//!     → ApiConfig passed by value to ApiClient::new
//! ```
//!
//! # Design Decisions
//! - Read once at startup; there is no reload
//! - All fields have defaults to allow minimal configs
//! - No process-wide singleton: callers hand the config to what needs it

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError, BASE_URL_ENV};
pub use schema::{ApiConfig, LogFormat, ObservabilityConfig, PortalConfig};
pub use validation::ValidationError;
