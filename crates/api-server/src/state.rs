//! Application state

use std::sync::Arc;

use tasks_core::task::TaskRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    tasks: Arc<dyn TaskRepository>,
}

impl AppState {
    /// Create state over any repository implementation
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    /// Get reference to the task repository
    pub fn tasks(&self) -> &dyn TaskRepository {
        self.tasks.as_ref()
    }
}
