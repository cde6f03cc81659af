//! Task management API library.
//!
//! A JSON-file backed task store served over HTTP, plus a CSV importer that
//! replays rows against a running instance.

pub mod config;
pub mod http;
pub mod import;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod storage;
pub mod tasks;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use storage::Database;
