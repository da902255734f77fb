//! Views and their (lazy) loading.
//!
//! # Responsibilities
//! - Define what a view is: a named thing that fetches its data via the API
//! - Hold either an eagerly available view or a loader producing one
//! - Run each lazy loader once per successful load
//!
//! # Design Decisions
//! - Loaded views are cached in a `tokio::sync::OnceCell`; concurrent
//!   navigations to the same route share one in-flight load
//! - A failed load is not cached; the next navigation runs the loader again
//! - Load errors are returned to the navigator, never swallowed here

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::http::{ApiClient, ApiResult};
use crate::routing::matcher::Params;

/// A page of the application.
pub trait View: Send + Sync + fmt::Debug {
    /// Logical view name.
    fn name(&self) -> &str;

    /// Fetch the data this view displays for the given route parameters.
    fn fetch<'a>(&'a self, client: &'a ApiClient, params: &'a Params)
        -> BoxFuture<'a, ApiResult<Value>>;
}

/// Shared handle to a loaded view.
pub type ViewHandle = Arc<dyn View>;

/// A loader failed to produce its view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("view failed to load: {reason}")]
pub struct LoadError {
    reason: String,
}

impl LoadError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

type Loader = Arc<dyn Fn() -> BoxFuture<'static, Result<ViewHandle, LoadError>> + Send + Sync>;

/// A view produced on demand by an async loader.
#[derive(Clone)]
pub struct LazyView {
    loader: Loader,
    cell: Arc<OnceCell<ViewHandle>>,
}

impl LazyView {
    pub fn new<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ViewHandle, LoadError>> + Send + 'static,
    {
        Self {
            loader: Arc::new(move || loader().boxed()),
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Return the cached view, running the loader if nothing is cached yet.
    pub async fn load(&self) -> Result<ViewHandle, LoadError> {
        self.cell
            .get_or_try_init(|| (self.loader)())
            .await
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Where a route's view comes from.
#[derive(Debug, Clone)]
pub enum ViewSource {
    Eager(ViewHandle),
    Lazy(LazyView),
}

impl ViewSource {
    pub async fn load(&self) -> Result<ViewHandle, LoadError> {
        match self {
            ViewSource::Eager(view) => Ok(view.clone()),
            ViewSource::Lazy(lazy) => lazy.load().await,
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, ViewSource::Lazy(_))
    }
}
