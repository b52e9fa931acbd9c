// Workflow instance HTTP routes

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use flowrun_core::{WorkflowEngine, WorkflowInst};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::common::{created, ErrorResponse, ListResponse};
use crate::error::ApiError;

/// Query string for starting an instance
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateInstanceQuery {
    /// Id of the definition to run.
    #[serde(rename = "defId")]
    #[param(example = "document-review")]
    pub def_id: String,
}

/// App state for instance routes
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

/// Create instance routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/insts", post(create_instance).get(list_instances))
        .route("/insts/:id", get(get_instance))
        .route("/insts/:id/actions/:action_id", post(execute_action))
        .with_state(state)
}

/// POST /insts?defId={defId} - Start a new instance of a definition
#[utoipa::path(
    post,
    path = "/insts",
    params(CreateInstanceQuery),
    responses(
        (status = 201, description = "Instance started in the initial state", body = WorkflowInst),
        (status = 400, description = "Missing defId query parameter"),
        (status = 404, description = "Definition not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "instances"
)]
pub async fn create_instance(
    State(state): State<AppState>,
    Query(query): Query<CreateInstanceQuery>,
) -> Result<Response, ApiError> {
    let inst = state.engine.create_instance(&query.def_id).await?;

    tracing::info!(
        instance_id = %inst.id,
        definition_id = %inst.def_id,
        state = %inst.current_state,
        "Instance started"
    );

    let location = format!("{}/insts/{}", state.base_path, urlencoding::encode(&inst.id));
    Ok(created(location, inst))
}

/// GET /insts - List all workflow instances
#[utoipa::path(
    get,
    path = "/insts",
    responses(
        (status = 200, description = "List of instances", body = ListResponse<WorkflowInst>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "instances"
)]
pub async fn list_instances(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<WorkflowInst>>, ApiError> {
    let insts = state.engine.list_instances().await?;
    Ok(Json(ListResponse::new(insts)))
}

/// GET /insts/{id} - Get a workflow instance by id
#[utoipa::path(
    get,
    path = "/insts/{id}",
    params(
        ("id" = String, Path, description = "Instance ID")
    ),
    responses(
        (status = 200, description = "Instance found", body = WorkflowInst),
        (status = 404, description = "Instance not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "instances"
)]
pub async fn get_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WorkflowInst>, ApiError> {
    let inst = state.engine.get_instance(&id).await?;
    Ok(Json(inst))
}

/// POST /insts/{id}/actions/{actionId} - Execute an action on an instance
#[utoipa::path(
    post,
    path = "/insts/{id}/actions/{actionId}",
    params(
        ("id" = String, Path, description = "Instance ID"),
        ("actionId" = String, Path, description = "Action ID")
    ),
    responses(
        (status = 200, description = "Action executed; updated instance", body = WorkflowInst),
        (status = 400, description = "Action invalid, disabled, or not allowed from the current state", body = ErrorResponse),
        (status = 404, description = "Instance not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "instances"
)]
pub async fn execute_action(
    State(state): State<AppState>,
    Path((id, action_id)): Path<(String, String)>,
) -> Result<Json<WorkflowInst>, ApiError> {
    let inst = state.engine.execute_action(&id, &action_id).await?;

    tracing::info!(
        instance_id = %inst.id,
        action_id = %action_id,
        state = %inst.current_state,
        "Action executed"
    );

    Ok(Json(inst))
}
