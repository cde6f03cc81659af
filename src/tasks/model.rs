//! Task records and request payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::storage::{timestamp, Row};

/// Table holding task rows.
pub const TABLE: &str = "tasks";

/// A task as stored and returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    /// A fresh, uncompleted task with a new id.
    pub fn new(title: String, description: String) -> Self {
        let now = timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            completed_at: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// The task as a store row, with the same field names it serializes under.
    pub fn into_row(self) -> Result<Row, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(row) => Ok(row),
            other => Err(serde::ser::Error::custom(format!(
                "task serialized to a non-object: {other}"
            ))),
        }
    }
}

/// Body accepted by create and update.
#[derive(Debug, Default, Deserialize)]
pub struct TaskPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Title and description that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
}

impl TaskPayload {
    /// Parse a JSON body. Anything that is not an object with string fields
    /// reads as an empty payload.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Both fields present and non-empty, or `None`.
    pub fn validate(self) -> Option<TaskFields> {
        match (self.title, self.description) {
            (Some(title), Some(description)) if !title.is_empty() && !description.is_empty() => {
                Some(TaskFields { title, description })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_row_shape() {
        let row = Task::new("A".into(), "B".into()).into_row().unwrap();
        assert_eq!(row["title"], "A");
        assert_eq!(row["description"], "B");
        assert!(row["completed_at"].is_null());
        assert_eq!(row["created_at"], row["updated_at"]);
        assert!(Uuid::parse_str(row["id"].as_str().unwrap()).is_ok());

        let task: Task = serde_json::from_value(Value::Object(row)).unwrap();
        assert_eq!(task.title, "A");
    }

    #[test]
    fn test_row_keys_follow_serialized_field_names() {
        let task = Task::new("A".into(), "B".into());
        let serialized = serde_json::to_value(&task).unwrap();
        let row = task.into_row().unwrap();

        assert_eq!(Value::Object(row.clone()), serialized);
        let mut keys: Vec<&str> = row.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["completed_at", "created_at", "description", "id", "title", "updated_at"]
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Task::new("t".into(), "d".into());
        let b = Task::new("t".into(), "d".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_payload_validation() {
        let ok = TaskPayload::from_body(br#"{"title":"A","description":"B"}"#).validate();
        assert_eq!(
            ok,
            Some(TaskFields {
                title: "A".into(),
                description: "B".into()
            })
        );

        assert!(TaskPayload::from_body(br#"{"title":"A"}"#).validate().is_none());
        assert!(TaskPayload::from_body(br#"{"title":"","description":"B"}"#).validate().is_none());
        assert!(TaskPayload::from_body(br#"{"title":1,"description":"B"}"#).validate().is_none());
        assert!(TaskPayload::from_body(b"not json").validate().is_none());
        assert!(TaskPayload::from_body(b"").validate().is_none());
        assert!(TaskPayload::from_body(b"null").validate().is_none());
    }
}
