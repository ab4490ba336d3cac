//! Task API endpoints
//!
//! Five REST routes, each a direct mapping onto one repository call.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use tasks_core::{task::Task, Error};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct MsgResponse {
    pub msg: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a repository error onto an HTTP status and JSON error body
fn map_error(e: Error) -> ApiError {
    let status = match e {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::TaskNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// GET / - List all tasks, ascending by creation time
async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.tasks().list().await.map_err(map_error)?;
    Ok(Json(tasks))
}

/// POST / - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .tasks()
        .add(&req.description)
        .await
        .map_err(map_error)?;
    Ok(Json(task))
}

/// PATCH /{id}/done - Mark a task done
async fn mark_done(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MsgResponse>, ApiError> {
    state.tasks().mark_done(&id).await.map_err(map_error)?;
    Ok(Json(MsgResponse { msg: "done" }))
}

/// PATCH /{id}/undone - Mark a task not done
async fn mark_undone(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MsgResponse>, ApiError> {
    state.tasks().mark_undone(&id).await.map_err(map_error)?;
    Ok(Json(MsgResponse { msg: "undone" }))
}

/// DELETE /{id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MsgResponse>, ApiError> {
    state.tasks().delete(&id).await.map_err(map_error)?;
    Ok(Json(MsgResponse { msg: "deleted" }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{id}/done", patch(mark_done))
        .route("/{id}/undone", patch(mark_undone))
        .route("/{id}", delete(delete_task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};
    use tasks_core::task::TaskRepository;
    use tasks_core::Result;

    /// In-memory fake standing in for the document-backed store
    #[derive(Default)]
    struct FakeRepository {
        tasks: Mutex<Vec<Task>>,
    }

    #[async_trait]
    impl TaskRepository for FakeRepository {
        async fn list(&self) -> Result<Vec<Task>> {
            Ok(self.tasks.lock().unwrap().clone())
        }

        async fn add(&self, description: &str) -> Result<Task> {
            if description.trim().is_empty() {
                return Err(Error::InvalidInput(
                    "description cannot be empty".to_string(),
                ));
            }
            let mut tasks = self.tasks.lock().unwrap();
            let task = Task {
                description: description.to_string(),
                created: Utc::now(),
                done: false,
                id: format!("task-{}", tasks.len() + 1),
            };
            tasks.push(task.clone());
            Ok(task)
        }

        async fn mark_done(&self, id: &str) -> Result<()> {
            let mut tasks = self.tasks.lock().unwrap();
            match tasks.iter_mut().find(|t| t.id == id) {
                Some(task) => {
                    task.done = true;
                    Ok(())
                }
                None => Err(Error::TaskNotFound(id.to_string())),
            }
        }

        async fn mark_undone(&self, id: &str) -> Result<()> {
            let mut tasks = self.tasks.lock().unwrap();
            match tasks.iter_mut().find(|t| t.id == id) {
                Some(task) => {
                    task.done = false;
                    Ok(())
                }
                None => Err(Error::TaskNotFound(id.to_string())),
            }
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.tasks.lock().unwrap().retain(|t| t.id != id);
            Ok(())
        }
    }

    /// Repository whose every call fails at the store layer
    struct BrokenRepository;

    fn store_failure() -> Error {
        Error::StoreRead {
            message: "collection unavailable".to_string(),
            source: Box::new(std::io::Error::other("connection reset")),
        }
    }

    #[async_trait]
    impl TaskRepository for BrokenRepository {
        async fn list(&self) -> Result<Vec<Task>> {
            Err(store_failure())
        }

        async fn add(&self, _description: &str) -> Result<Task> {
            Err(store_failure())
        }

        async fn mark_done(&self, _id: &str) -> Result<()> {
            Err(store_failure())
        }

        async fn mark_undone(&self, _id: &str) -> Result<()> {
            Err(store_failure())
        }

        async fn delete(&self, _id: &str) -> Result<()> {
            Err(store_failure())
        }
    }

    fn fake_state() -> AppState {
        AppState::new(Arc::new(FakeRepository::default()))
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let state = fake_state();

        let created = create_task(
            State(state.clone()),
            Json(CreateTaskRequest {
                description: "buy milk".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(created.0.description, "buy milk");
        assert!(!created.0.done);
        assert!(!created.0.id.is_empty());

        let listed = list_tasks(State(state)).await.unwrap();
        assert_eq!(listed.0.len(), 1);
        assert_eq!(listed.0[0], created.0);
    }

    #[tokio::test]
    async fn test_create_empty_description_is_bad_request() {
        let state = fake_state();

        let err = create_task(
            State(state),
            Json(CreateTaskRequest {
                description: String::new(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(!err.1 .0.error.is_empty());
    }

    #[tokio::test]
    async fn test_done_undone_round_trip() {
        let state = fake_state();

        let created = create_task(
            State(state.clone()),
            Json(CreateTaskRequest {
                description: "buy milk".to_string(),
            }),
        )
        .await
        .unwrap();
        let id = created.0.id.clone();

        let done = mark_done(State(state.clone()), Path(id.clone())).await.unwrap();
        assert_eq!(done.0.msg, "done");
        let listed = list_tasks(State(state.clone())).await.unwrap();
        assert!(listed.0[0].done);

        let undone = mark_undone(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(undone.0.msg, "undone");
        let listed = list_tasks(State(state)).await.unwrap();
        assert!(!listed.0[0].done);
    }

    #[tokio::test]
    async fn test_mark_done_unknown_id_is_not_found() {
        let state = fake_state();

        let err = mark_done(State(state), Path("no-such-id".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let state = fake_state();

        let created = create_task(
            State(state.clone()),
            Json(CreateTaskRequest {
                description: "buy milk".to_string(),
            }),
        )
        .await
        .unwrap();

        let deleted = delete_task(State(state.clone()), Path(created.0.id))
            .await
            .unwrap();
        assert_eq!(deleted.0.msg, "deleted");

        let listed = list_tasks(State(state)).await.unwrap();
        assert!(listed.0.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_succeeds() {
        let state = fake_state();

        let deleted = delete_task(State(state), Path("no-such-id".to_string()))
            .await
            .unwrap();
        assert_eq!(deleted.0.msg, "deleted");
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let state = AppState::new(Arc::new(BrokenRepository));

        let err = list_tasks(State(state.clone())).await.unwrap_err();
        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.1 .0.error.contains("collection unavailable"));

        let err = create_task(
            State(state),
            Json(CreateTaskRequest {
                description: "buy milk".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_task_json_shape() {
        let state = fake_state();

        let created = create_task(
            State(state),
            Json(CreateTaskRequest {
                description: "buy milk".to_string(),
            }),
        )
        .await
        .unwrap();

        let value = serde_json::to_value(&created.0).unwrap();
        assert_eq!(value["description"], "buy milk");
        assert_eq!(value["done"], false);
        assert_eq!(value["id"], created.0.id);
        assert!(value["created"].is_string());
    }
}
