// Workflow definition HTTP routes

use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use flowrun_core::{WorkflowDef, WorkflowEngine, WorkflowError};
use std::sync::Arc;

use crate::common::{created, ErrorResponse, ListResponse};
use crate::error::ApiError;

/// App state for definition routes
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<WorkflowEngine>,
    /// Prefix used when building `Location` headers
    pub base_path: String,
}

impl AppState {
    pub fn new(engine: Arc<WorkflowEngine>, base_path: impl Into<String>) -> Self {
        Self {
            engine,
            base_path: base_path.into(),
        }
    }
}

/// Create definition routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/defs", post(create_definition).get(list_definitions))
        .route("/defs/:id", get(get_definition))
        .with_state(state)
}

/// POST /defs - Submit a new workflow definition
#[utoipa::path(
    post,
    path = "/defs",
    request_body = WorkflowDef,
    responses(
        (status = 201, description = "Definition accepted and stored", body = WorkflowDef),
        (status = 400, description = "Definition rejected by validation", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "definitions"
)]
pub async fn create_definition(
    State(state): State<AppState>,
    Json(def): Json<WorkflowDef>,
) -> Result<Response, ApiError> {
    let def = state.engine.submit_definition(def).await?;

    tracing::info!(
        definition_id = %def.id,
        states = def.states.len(),
        actions = def.actions.len(),
        "Definition created"
    );

    let location = format!("{}/defs/{}", state.base_path, urlencoding::encode(&def.id));
    Ok(created(location, def))
}

/// GET /defs - List all workflow definitions
#[utoipa::path(
    get,
    path = "/defs",
    responses(
        (status = 200, description = "List of definitions", body = ListResponse<WorkflowDef>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "definitions"
)]
pub async fn list_definitions(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<WorkflowDef>>, ApiError> {
    let defs = state.engine.list_definitions().await?;
    Ok(Json(ListResponse::new(defs)))
}

/// GET /defs/{id} - Get a workflow definition by id
#[utoipa::path(
    get,
    path = "/defs/{id}",
    params(
        ("id" = String, Path, description = "Definition ID")
    ),
    responses(
        (status = 200, description = "Definition found", body = WorkflowDef),
        (status = 404, description = "Definition not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "definitions"
)]
pub async fn get_definition(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WorkflowDef>, ApiError> {
    let def = state
        .engine
        .get_definition(&id)
        .await?
        .ok_or_else(|| WorkflowError::DefinitionNotFound(id.clone()))?;

    Ok(Json(def))
}
