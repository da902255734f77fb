//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Location change (path, optional query/fragment)
//!     → navigator.rs (navigation entry point, history)
//!     → router.rs (route lookup, first match wins)
//!     → matcher.rs (segment match, :param capture)
//!     → view.rs (eager view, or lazy loader run once)
//!     → Mounted { route, params, view } or NavigationError
//!
//! Route table (at startup):
//!     routes.rs → RouteEntry[] → RouteTable::new (unique paths/names)
//!     → immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes are defined once, immutable at runtime
//! - No regex; patterns are static segments and `:name` parameters
//! - Deterministic: same location always resolves to the same route

pub mod matcher;
pub mod navigator;
pub mod router;
pub mod routes;
pub mod view;
pub mod views;

pub use matcher::{Params, PathPattern};
pub use navigator::{Mounted, NavigationError, Navigator};
pub use router::{RouteEntry, RouteError, RouteMatch, RouteTable};
pub use routes::app_routes;
pub use view::{LazyView, LoadError, View, ViewHandle, ViewSource};
