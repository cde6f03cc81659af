//! JSON-file backed table store.
//!
//! # Responsibilities
//! - Load the table document once at startup
//! - Serve filtered reads over ordered row sequences
//! - Apply insert/update/delete/complete and persist after each
//!
//! # Design Decisions
//! - Unreadable or malformed files fail soft: the store starts empty and
//!   re-initializes the file
//! - Snapshot writes happen under the write lock, so the last mutation is
//!   always the last write
//! - Writes go to a sibling temp file that is renamed over the target
//! - Mutations are staged on a copy; a failed write leaves the live tables untouched

use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::storage::types::{row_id, timestamp, Row, SearchFilter, Tables};

/// Error type for store persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize tables: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Table store persisted as a single JSON document.
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    tables: RwLock<Tables>,
}

impl Database {
    /// Open the store at `path`, loading any existing document.
    ///
    /// A missing, unreadable, or malformed file yields an empty store and an
    /// empty document is written in its place. Failing to write that document
    /// is logged and left for the next mutation to retry.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let tables = match load(&path).await {
            Ok(tables) => {
                tracing::info!(
                    path = %path.display(),
                    tables = tables.len(),
                    "Loaded database"
                );
                tables
            }
            Err(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    reason = %reason,
                    "Database file unavailable, starting empty"
                );
                let empty = Tables::new();
                if let Err(e) = write_snapshot(&path, &empty).await {
                    tracing::error!(error = %e, "Failed to initialize database file");
                }
                empty
            }
        };

        Self {
            path,
            tables: RwLock::new(tables),
        }
    }

    /// Rows of `table` in insertion order, optionally narrowed by `filter`.
    ///
    /// An absent table reads as empty.
    pub async fn select(&self, table: &str, filter: Option<&SearchFilter>) -> Vec<Row> {
        let tables = self.tables.read().await;
        let Some(rows) = tables.get(table) else {
            return Vec::new();
        };

        match filter {
            Some(filter) => rows.iter().filter(|row| filter.matches(row)).cloned().collect(),
            None => rows.clone(),
        }
    }

    /// Look up a single row by id.
    pub async fn find(&self, table: &str, id: &str) -> Option<Row> {
        let tables = self.tables.read().await;
        tables
            .get(table)?
            .iter()
            .find(|row| row_id(row) == Some(id))
            .cloned()
    }

    /// Append `row` to `table`, creating the table if needed.
    pub async fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError> {
        let mut tables = self.tables.write().await;
        let mut next = tables.clone();
        next.entry(table.to_string()).or_default().push(row.clone());
        commit(&self.path, &mut tables, next).await?;

        tracing::debug!(table, id = ?row_id(&row), "Inserted row");
        Ok(row)
    }

    /// Merge `changes` over the row with `id`. The stored `id` is never replaced.
    ///
    /// Returns `false` without touching anything when the row does not exist.
    pub async fn update(&self, table: &str, id: &str, changes: Row) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(index) = position(&tables, table, id) else {
            return Ok(false);
        };

        let mut next = tables.clone();
        let row = &mut next.entry(table.to_string()).or_default()[index];
        for (field, value) in changes {
            if field != "id" {
                row.insert(field, value);
            }
        }
        commit(&self.path, &mut tables, next).await?;

        tracing::debug!(table, id, "Updated row");
        Ok(true)
    }

    /// Remove the row with `id`.
    pub async fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(index) = position(&tables, table, id) else {
            return Ok(false);
        };

        let mut next = tables.clone();
        next.entry(table.to_string()).or_default().remove(index);
        commit(&self.path, &mut tables, next).await?;

        tracing::debug!(table, id, "Deleted row");
        Ok(true)
    }

    /// Toggle `completed_at`: a set timestamp is cleared, anything else is set to now.
    pub async fn complete(&self, table: &str, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(index) = position(&tables, table, id) else {
            return Ok(false);
        };

        let mut next = tables.clone();
        let row = &mut next.entry(table.to_string()).or_default()[index];
        let completed = match row.get("completed_at") {
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        };
        let completed_at = if completed {
            Value::Null
        } else {
            Value::String(timestamp())
        };
        row.insert("completed_at".to_string(), completed_at);
        commit(&self.path, &mut tables, next).await?;

        tracing::debug!(table, id, completed = !completed, "Toggled completion");
        Ok(true)
    }
}

fn position(tables: &Tables, table: &str, id: &str) -> Option<usize> {
    tables
        .get(table)?
        .iter()
        .position(|row| row_id(row) == Some(id))
}

/// Persist `next` and only then make it the live state.
async fn commit(path: &Path, tables: &mut Tables, next: Tables) -> Result<(), StoreError> {
    write_snapshot(path, &next).await?;
    *tables = next;
    Ok(())
}

async fn load(path: &Path) -> Result<Tables, String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

async fn write_snapshot(path: &Path, tables: &Tables) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(tables)?;

    let mut tmp: OsString = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, &bytes)
        .await
        .map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}
