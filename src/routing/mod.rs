//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered route scan, exact method)
//!     → pattern.rs (anchored template match, parameter capture)
//!     → Return: handler + PathParams, or NoMatch
//!
//! Route Compilation (at startup):
//!     "/tasks/:id/complete"
//!     → ^/tasks/(?P<id>[^/]+)/complete$
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod pattern;
pub mod router;

pub use pattern::{PathParams, PathPattern, PatternError};
pub use router::{Route, RouteMatch, Router};
