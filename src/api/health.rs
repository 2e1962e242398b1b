//! Health check endpoint
//!
//! `/health` — status, version and catalog size (for load balancers)

use axum::extract::Extension;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use conclave_core::ChatPipeline;
use serde::Serialize;
use std::sync::Arc;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub agents: usize,
}

async fn health_check(Extension(pipeline): Extension<Arc<ChatPipeline>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        agents: pipeline.catalog().len(),
    })
}

/// Create health routes
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}
