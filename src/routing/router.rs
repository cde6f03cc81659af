//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the first route whose method and path both match
//! - Return matched handler with its path parameters, or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(n) scan; first match wins, so declare specific routes first
//! - Method comparison is exact

use axum::http::Method;

use crate::routing::pattern::{PathParams, PathPattern, PatternError};

/// A single route entry.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub method: Method,
    pub pattern: PathPattern,
    pub handler: H,
}

/// Result of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub handler: &'a H,
    pub params: PathParams,
}

/// Ordered route table.
#[derive(Debug, Clone)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Fails if `template` does not compile.
    pub fn route(mut self, method: Method, template: &str, handler: H) -> Result<Self, PatternError> {
        let pattern = PathPattern::compile(template)?;
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        Ok(self)
    }

    /// Find the first route matching `method` and `path`.
    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                route.pattern.captures(path).map(|params| RouteMatch {
                    handler: &route.handler,
                    params,
                })
            })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
