//! Row and filter types shared by the store and its callers.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A single record: field name → JSON value. Always carries a string `id`.
pub type Row = Map<String, Value>;

/// The whole persisted document: table name → ordered rows.
pub type Tables = BTreeMap<String, Vec<Row>>;

/// Current UTC time in the persisted timestamp format (`2024-01-01T12:00:00.000Z`).
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Case-insensitive substring search over a set of fields.
///
/// A row matches when at least one of the listed fields is a string containing
/// the field's search term. Missing or non-string fields never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    terms: Vec<(String, String)>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to search. Terms are lowercased once here.
    pub fn field(mut self, name: impl Into<String>, term: &str) -> Self {
        self.terms.push((name.into(), term.to_lowercase()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.terms.iter().any(|(field, term)| {
            row.get(field)
                .and_then(Value::as_str)
                .map(|value| value.to_lowercase().contains(term.as_str()))
                .unwrap_or(false)
        })
    }
}

pub(crate) fn row_id(row: &Row) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}
