//! Record storage subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     db.json → database.rs (load, fall back to empty) → in-memory tables
//!
//! per mutation:
//!     handler → Database::{insert, update, delete, complete}
//!     → mutate rows under write lock
//!     → serialize whole document → temp file → rename over db.json
//! ```
//!
//! # Design Decisions
//! - Tables are ordered row sequences; insertion order is the only ordering
//! - The file is the source of truth across restarts and is rewritten wholesale
//! - Rows are schemaless JSON objects; required fields are the handlers' concern
//! - Persistence completes before a mutation returns, so durability is observable

pub mod database;
pub mod types;

pub use database::{Database, StoreError};
pub use types::{timestamp, Row, SearchFilter, Tables};
