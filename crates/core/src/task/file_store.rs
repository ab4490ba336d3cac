//! File-backed task store
//!
//! Keeps one namespace's task collection as a single JSON document file:
//! an object mapping store-assigned ids to document bodies. The collection
//! path is fixed at construction and never changes; the file handle is
//! released when the store is dropped.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{Task, TaskDocument};
use super::repository::TaskRepository;
use crate::{Config, Error, Result};

/// Document-store client for one namespace's task collection
pub struct FileTaskStore {
    /// Path to the collection file
    path: PathBuf,
    /// In-memory cache of documents, keyed by store-assigned id
    cache: RwLock<HashMap<String, TaskDocument>>,
}

impl FileTaskStore {
    /// Open the task collection for the configured project and namespace.
    ///
    /// The configuration is validated before any filesystem access: the
    /// project id and namespace must be non-empty, and the namespace must
    /// not contain a path separator.
    pub async fn open(config: &Config) -> Result<Self> {
        if config.project_id.is_empty() {
            return Err(Error::Config("project id must not be empty".to_string()));
        }
        if config.namespace.is_empty() {
            return Err(Error::Config("namespace must not be empty".to_string()));
        }
        if config.namespace.contains('/') {
            return Err(Error::Config(format!(
                "namespace must not contain '/': {}",
                config.namespace
            )));
        }

        let path = collection_path(config);
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                Error::StoreRead {
                    message: format!("could not read task collection {}", path.display()),
                    source: Box::new(e),
                }
            })?;
            serde_json::from_str(&content).map_err(|e| Error::StoreRead {
                message: format!("could not parse task collection {}", path.display()),
                source: Box::new(e),
            })?
        } else {
            HashMap::new()
        };

        tracing::debug!("Opened task collection at {}", path.display());

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    /// Write the cache back to the collection file
    async fn persist(&self, context: &str) -> Result<()> {
        let content = {
            let cache = self.cache.read().await;
            serde_json::to_string_pretty(&*cache).map_err(|e| Error::StoreWrite {
                message: format!("could not serialize task collection while {}", context),
                source: Box::new(e),
            })?
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::StoreWrite {
                    message: format!("could not create collection directory while {}", context),
                    source: Box::new(e),
                })?;
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| Error::StoreWrite {
                message: format!(
                    "could not write task collection {} while {}",
                    self.path.display(),
                    context
                ),
                source: Box::new(e),
            })?;
        Ok(())
    }

    /// Partial update of the done flag; every other field untouched
    async fn set_done(&self, id: &str, done: bool) -> Result<()> {
        let previous = {
            let mut cache = self.cache.write().await;
            match cache.get_mut(id) {
                Some(doc) => {
                    let previous = doc.done;
                    doc.done = done;
                    previous
                }
                None => return Err(Error::TaskNotFound(id.to_string())),
            }
        };

        // Already in the requested state; nothing to write
        if previous == done {
            return Ok(());
        }

        if let Err(e) = self.persist("updating done flag").await {
            if let Some(doc) = self.cache.write().await.get_mut(id) {
                doc.done = previous;
            }
            return Err(e);
        }
        Ok(())
    }
}

/// Fixed collection path: `<data_dir>/<project>/<namespace>/App/Tasks.json`
fn collection_path(config: &Config) -> PathBuf {
    config
        .data_dir
        .join(&config.project_id)
        .join(&config.namespace)
        .join("App")
        .join("Tasks.json")
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn list(&self) -> Result<Vec<Task>> {
        let cache = self.cache.read().await;
        let mut tasks: Vec<Task> = cache
            .iter()
            .map(|(id, doc)| doc.clone().into_task(id.clone()))
            .collect();
        // Ascending by creation time, id as the deterministic tie-break
        tasks.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(tasks)
    }

    async fn add(&self, description: &str) -> Result<Task> {
        if description.trim().is_empty() {
            return Err(Error::InvalidInput(
                "description cannot be empty".to_string(),
            ));
        }

        let id = Uuid::new_v4().to_string();
        let doc = TaskDocument {
            description: description.to_string(),
            created: Utc::now(),
            done: false,
        };

        {
            let mut cache = self.cache.write().await;
            cache.insert(id.clone(), doc.clone());
        }

        if let Err(e) = self
            .persist(&format!("adding task {:?}", description))
            .await
        {
            // Keep the cache consistent with what is on disk
            self.cache.write().await.remove(&id);
            return Err(e);
        }

        Ok(doc.into_task(id))
    }

    async fn mark_done(&self, id: &str) -> Result<()> {
        self.set_done(id, true).await
    }

    async fn mark_undone(&self, id: &str) -> Result<()> {
        self.set_done(id, false).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let removed = {
            let mut cache = self.cache.write().await;
            cache.remove(id)
        };

        match removed {
            // Deleting an id that does not exist is treated as success
            None => Ok(()),
            Some(doc) => {
                if let Err(e) = self.persist("deleting task").await {
                    self.cache.write().await.insert(id.to_string(), doc);
                    return Err(e);
                }
                Ok(())
            }
        }
    }
}
