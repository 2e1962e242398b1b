//! Agent roster endpoint
//!
//! GET /v1/agents - Registered personas, ordered by id

use axum::{extract::Extension, routing::get, Json, Router};
use conclave_core::{AgentDescriptor, ChatPipeline};
use serde::Serialize;
use std::sync::Arc;

/// Roster listing
#[derive(Debug, Serialize)]
pub struct AgentList {
    pub object: &'static str,
    pub default_agent: String,
    pub data: Vec<AgentDescriptor>,
}

async fn list_agents(Extension(pipeline): Extension<Arc<ChatPipeline>>) -> Json<AgentList> {
    let catalog = pipeline.catalog();
    Json(AgentList {
        object: "list",
        default_agent: catalog.default_agent().codename().to_string(),
        data: catalog
            .all()
            .cloned()
            .collect(),
    })
}

/// Create agent routes
pub fn agents_routes() -> Router {
    Router::new().route("/v1/agents", get(list_agents))
}
