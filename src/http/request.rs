//! Request context handed to route handlers.
//!
//! # Responsibilities
//! - Carry path parameters, query values and the raw body
//! - Name the request-id header shared by the middleware stack
//!
//! # Design Decisions
//! - Body stays raw bytes; each handler decides how to parse it
//! - Request ID added as early as possible for tracing

use axum::body::Bytes;
use std::collections::HashMap;

use crate::routing::PathParams;

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Everything a handler may read from the incoming request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub params: PathParams,
    pub query: HashMap<String, String>,
    pub body: Bytes,
}

impl RequestContext {
    pub fn new(params: PathParams, query: HashMap<String, String>, body: Bytes) -> Self {
        Self {
            params,
            query,
            body,
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Query value for `name`, treating an empty value as absent.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}
