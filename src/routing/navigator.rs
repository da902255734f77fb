//! Navigation over the route table.
//!
//! # Responsibilities
//! - Resolve a location, load its view, and hand back what to mount
//! - Keep a web-style history stack (push on success, `back`)
//! - Surface unmatched locations and load failures to the caller
//!
//! # Design Decisions
//! - Failed navigations leave the history untouched
//! - The navigator owns no network state; views fetch through `ApiClient`

use thiserror::Error;

use crate::http::{ApiClient, ApiResult};
use crate::routing::matcher::Params;
use crate::routing::router::{RouteError, RouteTable};
use crate::routing::view::{LoadError, ViewHandle};

/// Why a navigation did not mount anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route matches '{0}'")]
    NotFound(String),

    #[error("route '{route}' could not be loaded: {source}")]
    Load {
        route: String,
        #[source]
        source: LoadError,
    },

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Result of a successful navigation.
#[derive(Debug, Clone)]
pub struct Mounted {
    /// Name of the matched route.
    pub route: String,
    /// Location as navigated to.
    pub location: String,
    pub params: Params,
    pub view: ViewHandle,
}

impl Mounted {
    /// Let the mounted view fetch its data.
    pub async fn fetch(&self, client: &ApiClient) -> ApiResult<serde_json::Value> {
        self.view.fetch(client, &self.params).await
    }
}

/// Drives navigation for one browsing session.
#[derive(Debug)]
pub struct Navigator {
    table: RouteTable,
    history: Vec<String>,
}

impl Navigator {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            history: Vec::new(),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Location currently shown, if any navigation succeeded.
    pub fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Navigate to `location` and push it onto the history.
    pub async fn navigate(&mut self, location: &str) -> Result<Mounted, NavigationError> {
        let mounted = self.mount(location).await?;
        self.history.push(location.to_string());
        Ok(mounted)
    }

    /// Navigate to a named route.
    pub async fn navigate_named(
        &mut self,
        name: &str,
        params: &Params,
    ) -> Result<Mounted, NavigationError> {
        let location = self.table.href(name, params)?;
        self.navigate(&location).await
    }

    /// Go back one entry. Returns `None` when there is nothing to go back to.
    pub async fn back(&mut self) -> Option<Result<Mounted, NavigationError>> {
        let previous = self.history.iter().rev().nth(1)?.clone();
        let result = self.mount(&previous).await;
        if result.is_ok() {
            self.history.pop();
        }
        Some(result)
    }

    async fn mount(&self, location: &str) -> Result<Mounted, NavigationError> {
        let Some(matched) = self.table.resolve(location) else {
            tracing::warn!(location = %location, "No route matched");
            return Err(NavigationError::NotFound(location.to_string()));
        };

        let route = matched.entry.name().to_string();
        let view = matched.entry.view().load().await.map_err(|source| {
            tracing::error!(route = %route, location = %location, error = %source, "View load failed");
            NavigationError::Load {
                route: route.clone(),
                source,
            }
        })?;

        tracing::debug!(route = %route, location = %location, "Navigated");

        Ok(Mounted {
            route,
            location: location.to_string(),
            params: matched.params,
            view,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::routes::app_routes;

    #[tokio::test]
    async fn test_navigate_pushes_history() {
        let mut nav = Navigator::new(app_routes().unwrap());
        assert_eq!(nav.current(), None);

        let mounted = nav.navigate("/").await.unwrap();
        assert_eq!(mounted.route, "pacijenti");

        let mounted = nav.navigate("/pacijenti/42/pregledi").await.unwrap();
        assert_eq!(mounted.route, "pregledi");
        assert_eq!(mounted.params.get("id"), Some("42"));
        assert_eq!(mounted.view.name(), "pregledi");
        assert_eq!(nav.history(), ["/", "/pacijenti/42/pregledi"]);
    }

    #[tokio::test]
    async fn test_not_found_leaves_history() {
        let mut nav = Navigator::new(app_routes().unwrap());
        nav.navigate("/").await.unwrap();

        let err = nav.navigate("/lijekovi").await.unwrap_err();
        assert_eq!(err, NavigationError::NotFound("/lijekovi".into()));
        assert_eq!(nav.current(), Some("/"));
    }

    #[tokio::test]
    async fn test_back() {
        let mut nav = Navigator::new(app_routes().unwrap());
        assert!(nav.back().await.is_none());

        nav.navigate("/").await.unwrap();
        assert!(nav.back().await.is_none());

        nav.navigate("/pacijenti/1/recepti").await.unwrap();
        let mounted = nav.back().await.unwrap().unwrap();
        assert_eq!(mounted.route, "pacijenti");
        assert_eq!(nav.history(), ["/"]);
    }

    #[tokio::test]
    async fn test_navigate_named() {
        let mut nav = Navigator::new(app_routes().unwrap());
        let params: Params = [("id", "5")].into_iter().collect();
        let mounted = nav.navigate_named("povijest-bolesti", &params).await.unwrap();
        assert_eq!(mounted.location, "/pacijenti/5/povijest-bolesti");

        let err = nav.navigate_named("pregledi", &Params::new()).await.unwrap_err();
        assert!(matches!(err, NavigationError::Route(RouteError::MissingParam { .. })));
    }
}
