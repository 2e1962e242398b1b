//! Web API module for Conclave
//!
//! Provides the OpenAI-compatible surface:
//! - Chat completions (JSON and SSE)
//! - Agent roster and model listing
//! - Health check

pub mod agents;
pub mod chat;
pub mod health;
pub mod models;

use axum::{Extension, Router};
use conclave_core::ChatPipeline;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use agents::agents_routes;
pub use chat::chat_routes;
pub use health::health_routes;
pub use models::models_routes;

/// Create the application router
pub fn router(pipeline: Arc<ChatPipeline>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(agents_routes())
        .merge(models_routes())
        .merge(chat_routes())
        .layer(Extension(pipeline))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
