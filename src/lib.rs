//! Patient-records portal: route table and backend API client.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::PortalConfig;
pub use http::{normalize_path, ApiClient, ApiError};
pub use routing::{app_routes, Navigator, RouteTable};
