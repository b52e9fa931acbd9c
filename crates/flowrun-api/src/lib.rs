// Flowrun HTTP API
//
// Thin axum shell over flowrun-core: maps each engine operation to a route,
// each engine error to a status code, and serves the OpenAPI document.

pub mod common;
pub mod config;
pub mod definitions;
pub mod error;
pub mod instances;

use axum::http::{header, Method};
use axum::{routing::get, Json, Router};
use flowrun_core::{ActionDef, HistoryEntry, State, WorkflowDef, WorkflowEngine, WorkflowInst};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::common::{ErrorResponse, ListResponse};
use crate::config::ApiConfig;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        definitions::create_definition,
        definitions::list_definitions,
        definitions::get_definition,
        instances::create_instance,
        instances::list_instances,
        instances::get_instance,
        instances::execute_action,
    ),
    components(
        schemas(
            WorkflowDef, State, ActionDef,
            WorkflowInst, HistoryEntry,
            ErrorResponse,
            ListResponse<WorkflowDef>,
            ListResponse<WorkflowInst>,
        )
    ),
    tags(
        (name = "definitions", description = "Workflow definition endpoints"),
        (name = "instances", description = "Workflow instance and action endpoints")
    ),
    info(
        title = "Workflow API",
        version = "v1",
        description = "API for declaring state-machine workflows and running instances of them",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

/// Build the full application router from an engine and configuration
pub fn app(engine: Arc<WorkflowEngine>, config: &ApiConfig) -> Router {
    let api_routes = Router::new()
        .merge(definitions::routes(definitions::AppState::new(
            engine.clone(),
            config.api_prefix.clone(),
        )))
        .merge(instances::routes(instances::AppState::new(
            engine,
            config.api_prefix.clone(),
        )));

    let mut app = Router::new()
        .route("/health", get(health))
        .merge(build_router_with_prefix(api_routes, &config.api_prefix));

    if config.swagger_ui_enabled {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));
    }

    // Add CORS layer only if origins are configured
    if !config.cors_allowed_origins.is_empty() {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.cors_allowed_origins.clone()))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]),
        );
    }

    app.layer(TraceLayer::new_for_http())
}

/// Build router with optional API prefix (extracted for testing)
fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}
