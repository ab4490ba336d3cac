//! Task repository trait
//!
//! Defines the interface between the HTTP layer and the backing store.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Repository interface for namespace-scoped task storage
///
/// One document-backed implementation serves the API; tests substitute an
/// in-memory fake. The store handle is owned by the implementing value and
/// released when it is dropped.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks in the namespace, ascending by creation time
    async fn list(&self) -> Result<Vec<Task>>;

    /// Create a task; the store assigns the id and creation time
    async fn add(&self, description: &str) -> Result<Task>;

    /// Set the done flag on the identified task
    async fn mark_done(&self, id: &str) -> Result<()>;

    /// Clear the done flag on the identified task
    async fn mark_undone(&self, id: &str) -> Result<()>;

    /// Remove the identified task; removing an unknown id is not an error
    async fn delete(&self, id: &str) -> Result<()>;
}
