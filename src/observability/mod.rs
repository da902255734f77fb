//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http::client (request dispatched / response / error)
//! routing::navigator (navigated / no match / load failure)
//!     → tracing events with request_id, method, url, status fields
//!     → logging.rs subscriber (stderr, pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; the binary installs the subscriber
//! - Request ID flows through every event of one API call

pub mod logging;

pub use logging::init_logging;
