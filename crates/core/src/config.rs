//! Service configuration
//!
//! All environment lookups happen here, once, at process start. Core logic
//! receives a finished `Config` and never reads the environment itself.

use std::path::PathBuf;

use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = ".tasks-data";

/// Service configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Selects the document-store instance to connect to
    pub project_id: String,
    /// Scopes every collection path; must not contain '/'
    pub namespace: String,
    /// Root directory of the document store
    pub data_dir: PathBuf,
    /// HTTP listen port
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment
    ///
    /// `STORE_PROJECT` and `TASKS_NAMESPACE` are required; `TASKS_DATA_DIR`
    /// and `PORT` fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let project_id = std::env::var("STORE_PROJECT")
            .map_err(|_| Error::Config("STORE_PROJECT must be set".to_string()))?;
        let namespace = std::env::var("TASKS_NAMESPACE")
            .map_err(|_| Error::Config("TASKS_NAMESPACE must be set".to_string()))?;
        let data_dir = std::env::var("TASKS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        let port = match std::env::var("PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            project_id,
            namespace,
            data_dir,
            port,
        })
    }

    /// Build a configuration directly, with default port
    pub fn new(
        project_id: impl Into<String>,
        namespace: impl Into<String>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            namespace: namespace.into(),
            data_dir: data_dir.into(),
            port: DEFAULT_PORT,
        }
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.parse()
        .map_err(|_| Error::Config(format!("PORT is not a valid port number: {}", raw)))
}
