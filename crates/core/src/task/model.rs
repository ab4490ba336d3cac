//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task record
///
/// `id` is assigned by the store when the task is persisted; it is empty
/// only for a task that has not been written yet, and is omitted from the
/// JSON representation in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub created: DateTime<Utc>,
    pub done: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

/// Stored document body
///
/// The id is not part of the body; it lives in the enclosing document key
/// and is attached onto the Task when read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TaskDocument {
    pub description: String,
    pub created: DateTime<Utc>,
    pub done: bool,
}

impl TaskDocument {
    pub(crate) fn into_task(self, id: impl Into<String>) -> Task {
        Task {
            description: self.description,
            created: self.created,
            done: self.done,
            id: id.into(),
        }
    }
}
