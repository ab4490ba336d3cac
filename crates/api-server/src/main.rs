//! HTTP server for the task-tracking service
//!
//! This is the main entry point. It binds the task routes onto a
//! namespace-scoped task repository backed by the document store.

mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tasks_core::task::FileTaskStore;
use tasks_core::Config;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=debug,tasks_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // The store handle lives for the whole process and is released when it
    // is dropped on exit.
    let store = match FileTaskStore::open(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Could not open task store: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Task store opened for project {} namespace {}",
        config.project_id,
        config.namespace
    );

    let app_state = AppState::new(Arc::new(store));

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::task::router())
        .with_state(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Task API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
