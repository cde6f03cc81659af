//! Task API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (middleware: request id, trace, timeout, body limit)
//!                          │
//!                          ▼
//!                     routing::Router  ── method + /tasks/:id/complete pattern
//!                          │
//!                          ▼
//!                     tasks::handlers  ── validate body, pick store operation
//!                          │
//!                          ▼
//!                     storage::Database ── mutate rows, rewrite db.json
//!     Client Response
//!     ◀────────────── 201 / 200 JSON / 204 / 400 {message}
//! ```

use clap::Parser;
use std::path::PathBuf;

use task_api::config::{load_or_default, with_bind_override};
use task_api::lifecycle;
use task_api::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "task-api")]
#[command(about = "Task management HTTP API backed by a JSON file", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = with_bind_override(load_or_default(cli.config.as_deref())?, cli.bind)?;

    init_logging(&config.observability.log_level);
    tracing::info!("task-api v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
