use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use task_api::config::load_or_default;
use task_api::import::{read_rows, Importer};
use task_api::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "task-import")]
#[command(about = "Bulk-create tasks from a CSV file (title,description)", long_about = None)]
struct Cli {
    /// CSV file; the first line is a header and is skipped
    #[arg(short, long)]
    file: PathBuf,

    /// Base URL of the task API; `tasks` is appended to its path
    #[arg(short, long)]
    url: Option<String>,

    /// Pause between requests in milliseconds
    #[arg(short, long)]
    delay_ms: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability.log_level);

    let base_url = cli.url.unwrap_or(config.import.base_url);
    let delay = Duration::from_millis(cli.delay_ms.unwrap_or(config.import.delay_ms));

    let rows = read_rows(&cli.file)?;
    let importer = Importer::new(&base_url, delay)?;
    tracing::info!(
        rows = rows.len(),
        endpoint = %importer.endpoint(),
        delay = ?delay,
        "Starting import"
    );

    let summary = importer.run(&rows).await;
    println!("imported {} task(s), {} failed", summary.sent, summary.failed);
    Ok(())
}
