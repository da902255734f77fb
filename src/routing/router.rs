//! Route table lookup.
//!
//! # Responsibilities
//! - Store route entries in declaration order
//! - Resolve a location to exactly one entry plus its parameters
//! - Look up routes by name and generate links for them
//!
//! # Design Decisions
//! - Immutable after construction
//! - Paths and names are unique; checked once in `RouteTable::new`
//! - First match wins (declaration order)
//! - Explicit no-match (`None`) rather than a silent default

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::routing::matcher::{Params, PathPattern};
use crate::routing::view::{LazyView, ViewHandle, ViewSource};

/// Errors raised while building or querying the route table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("no route named '{0}'")]
    UnknownRoute(String),

    #[error("route '{pattern}' requires parameter '{param}'")]
    MissingParam { pattern: String, param: String },
}

/// One path → view binding.
#[derive(Debug)]
pub struct RouteEntry {
    name: String,
    pattern: PathPattern,
    view: ViewSource,
}

impl RouteEntry {
    pub fn new(path: &str, name: impl Into<String>, view: ViewSource) -> Result<Self, RouteError> {
        Ok(Self {
            name: name.into(),
            pattern: PathPattern::parse(path)?,
            view,
        })
    }

    /// Route whose view is available immediately.
    pub fn eager(path: &str, name: impl Into<String>, view: ViewHandle) -> Result<Self, RouteError> {
        Self::new(path, name, ViewSource::Eager(view))
    }

    /// Route whose view is produced by a loader on first navigation.
    pub fn lazy(path: &str, name: impl Into<String>, view: LazyView) -> Result<Self, RouteError> {
        Self::new(path, name, ViewSource::Lazy(view))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn view(&self) -> &ViewSource {
        &self.view
    }
}

/// A resolved location.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub params: Params,
}

/// Immutable, ordered set of routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Arc<Vec<RouteEntry>>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate paths or names.
    ///
    /// Paths are compared by shape, so `/a/:id` and `/a/:pid/` collide.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        {
            let mut shapes = HashSet::new();
            let mut names = HashSet::new();
            for entry in &entries {
                if !shapes.insert(entry.pattern.shape()) {
                    return Err(RouteError::DuplicatePath(entry.path().to_string()));
                }
                if !names.insert(entry.name()) {
                    return Err(RouteError::DuplicateName(entry.name().to_string()));
                }
            }
        }
        Ok(Self {
            entries: Arc::new(entries),
        })
    }

    /// Find the first route matching `location`.
    pub fn resolve(&self, location: &str) -> Option<RouteMatch<'_>> {
        self.entries.iter().find_map(|entry| {
            entry
                .pattern
                .matches(location)
                .map(|params| RouteMatch { entry, params })
        })
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Generate the path for a named route.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        self.by_name(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?
            .pattern
            .render(params)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
