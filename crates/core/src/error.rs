//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing configuration; fatal at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied input failed a precondition
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An update addressed a document id that does not exist
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Reading the task collection failed
    #[error("Store read failed: {message}")]
    StoreRead {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing the task collection failed
    #[error("Store write failed: {message}")]
    StoreWrite {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
