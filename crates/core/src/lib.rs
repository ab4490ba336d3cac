//! Core library for the task-tracking service
//!
//! This crate contains the core business logic, including:
//! - The task model and repository contract
//! - The document-backed task store
//! - Service configuration

pub mod config;
pub mod error;
pub mod task;

pub use config::Config;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
