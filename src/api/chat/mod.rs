//! Chat completions API
//!
//! POST /v1/chat/completions - Dispatch to mentioned agents (JSON or SSE)
//! POST /                    - Same handler, for chat-extension delivery

pub mod handlers;
pub mod types;


pub use handlers::chat_completions;

use axum::{routing::post, Router};

/// Create chat routes
pub fn chat_routes() -> Router {
    Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .route("/", post(chat_completions))
}
