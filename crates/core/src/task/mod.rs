//! Task module
//!
//! Task model, the repository contract, and the file-backed store.

mod file_store;
mod model;
mod repository;

pub use file_store::FileTaskStore;
pub use model::Task;
pub use repository::TaskRepository;
