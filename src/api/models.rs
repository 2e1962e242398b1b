//! Model listing endpoint
//!
//! GET /v1/models - The single composite model Conclave answers as

use axum::{extract::Extension, routing::get, Json, Router};
use conclave_core::ChatPipeline;
use serde::Serialize;
use std::sync::Arc;

/// OpenAI-style model entry
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub owned_by: &'static str,
}

/// OpenAI-style model list
#[derive(Debug, Serialize)]
pub struct ModelList {
    pub object: &'static str,
    pub data: Vec<ModelInfo>,
}

async fn list_models(Extension(pipeline): Extension<Arc<ChatPipeline>>) -> Json<ModelList> {
    Json(ModelList {
        object: "list",
        data: vec![ModelInfo {
            id: pipeline.model().to_string(),
            object: "model",
            created: 0,
            owned_by: "conclave",
        }],
    })
}

/// Create model routes
pub fn models_routes() -> Router {
    Router::new().route("/v1/models", get(list_models))
}
