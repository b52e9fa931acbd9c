// Flowrun API server
// Decision: Stores are in-memory; definitions and instances live for the process lifetime
// Decision: Configuration comes from environment variables (optionally via .env)

use anyhow::{Context, Result};
use flowrun_api::config::ApiConfig;
use flowrun_core::WorkflowEngine;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    let dotenv_path = dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowrun_api=debug,flowrun_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("flowrun-api starting...");
    if let Some(path) = dotenv_path {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    let config = ApiConfig::from_env().context("Invalid configuration")?;

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }
    if config.cors_allowed_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_allowed_origins, "CORS origins configured");
    }
    if config.swagger_ui_enabled {
        tracing::info!("Swagger UI available at /swagger-ui");
    }

    let engine = Arc::new(WorkflowEngine::in_memory());
    let app = flowrun_api::app(engine, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
