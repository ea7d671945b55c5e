//! HTTP server implementation for the task API.
//!
//! This module provides the axum-based router and the REST handlers that
//! translate requests into repository calls.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::Database;
use crate::db::tasks::Task;
use crate::error::{ApiError, ApiResult};

/// Server state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Reference to the task database.
    db: Arc<Database>,
}

impl AppState {
    /// Create a new server state instance.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Get the database reference.
    pub fn db(&self) -> &Arc<Database> {
        &self.db
    }
}

/// Health check response.
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Body for task creation. Binding into a typed struct keeps malformed
/// payloads out of the store entirely.
#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
}

/// Body for task update. Full replace: omitted description becomes NULL,
/// omitted completed becomes false.
#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub completed: Option<String>,
}

/// Interpret the `completed` query parameter: `"true"` filters for
/// completed tasks, any other literal filters for incomplete ones,
/// absence means no filter.
fn completed_filter(param: Option<&str>) -> Option<bool> {
    param.map(|value| value == "true")
}

async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<CreateTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    if body.title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }

    let task = state.db().create_task(&body.title, body.description.as_deref())?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.db().list_tasks(completed_filter(query.completed.as_deref()))?;
    Ok(Json(tasks))
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = state.db().get_task(id)?.ok_or(ApiError::TaskNotFound)?;
    Ok(Json(task))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTask>,
) -> ApiResult<Json<Task>> {
    if body.title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }

    let task = state
        .db()
        .update_task(id, &body.title, body.description.as_deref(), body.completed)?
        .ok_or(ApiError::TaskNotFound)?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.db().delete_task(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener and serve until interrupted.
pub async fn start_server(db: Arc<Database>, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(db);
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    info!("Task server listening on http://{}", bound_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Task server shutting down");
        })
        .await?;

    Ok(())
}
