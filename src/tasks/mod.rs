//! Task resource.
//!
//! # Data Flow
//! ```text
//! dispatcher
//!     → routes.rs (Endpoint tag from the matched route)
//!     → handlers.rs (validate body, call store)
//!     → model.rs (Task rows, payload validation)
//!     → storage::Database
//! ```

pub mod handlers;
pub mod model;
pub mod routes;

pub use model::{Task, TaskFields, TaskPayload, TABLE};
pub use routes::{task_routes, Endpoint};
