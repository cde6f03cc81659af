//! CSV task importer.
//!
//! # Data Flow
//! ```text
//! tasks.csv (header + title,description rows)
//!     → read_rows (csv parse, header skipped, blank lines skipped)
//!     → Importer::run
//!         for each row: POST {base}/tasks → await → sleep(delay)
//!     → ImportSummary
//! ```
//!
//! # Design Decisions
//! - Strictly sequential; the delay is pacing, not flow control
//! - A failed row is logged and skipped, never retried

use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Error type for the importer.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// One task to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRow {
    pub title: String,
    pub description: String,
}

/// Outcome counts of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub sent: usize,
    pub failed: usize,
}

/// Parse rows from CSV text. The first line is a header and is skipped.
/// Missing columns read as empty strings.
pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<ImportRow>, ImportError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(ImportRow {
            title: record.get(0).unwrap_or_default().to_string(),
            description: record.get(1).unwrap_or_default().to_string(),
        });
    }
    Ok(rows)
}

/// Parse rows from a CSV file.
pub fn read_rows(path: &Path) -> Result<Vec<ImportRow>, ImportError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    parse_rows(file)
}

/// Replays rows as create-task requests against a running API.
pub struct Importer {
    client: reqwest::Client,
    endpoint: Url,
    delay: Duration,
}

impl Importer {
    pub fn new(base_url: &str, delay: Duration) -> Result<Self, ImportError> {
        let mut base = Url::parse(base_url)?;
        // a base without a trailing slash would have its last segment replaced by the join
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("tasks")?;
        // the API is addressed directly; system proxies are not consulted
        let client = reqwest::Client::builder().no_proxy().build()?;
        Ok(Self {
            client,
            endpoint,
            delay,
        })
    }

    /// The URL rows are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send every row in order, pausing `delay` after each.
    pub async fn run(&self, rows: &[ImportRow]) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for (line, row) in rows.iter().enumerate() {
            match self.client.post(self.endpoint.clone()).json(row).send().await {
                Ok(res) if res.status().is_success() => {
                    summary.sent += 1;
                    tracing::info!(line = line + 1, title = %row.title, "Imported task");
                }
                Ok(res) => {
                    summary.failed += 1;
                    tracing::warn!(line = line + 1, status = %res.status(), "Import rejected");
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!(line = line + 1, error = %e, "Import request failed");
                }
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        summary
    }
}
