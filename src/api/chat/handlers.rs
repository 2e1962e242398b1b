use super::types::ApiError;
use axum::{
    extract::rejection::JsonRejection,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    Extension, Json,
};
use conclave_core::{ChatPipeline, ChunkStream, InboundRequest};
use futures::stream::{self, Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, error};

/// POST /v1/chat/completions (also mounted at POST /)
pub async fn chat_completions(
    Extension(pipeline): Extension<Arc<ChatPipeline>>,
    payload: Result<Json<InboundRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;

    debug!(
        messages = request.messages.len(),
        stream = request.stream,
        "Chat request received"
    );

    let response = pipeline.respond(&request).await?;

    if request.stream {
        Ok(sse(pipeline.stream(response)).into_response())
    } else {
        Ok(Json(response).into_response())
    }
}

/// Adapt a chunk iterator to an SSE body; dropping the body stops emission
fn sse(frames: ChunkStream) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = stream::iter(frames).filter_map(|frame| async move {
        match frame.to_sse_data() {
            Ok(data) => Some(Ok(Event::default().data(data))),
            Err(e) => {
                error!(error = %e, "Failed to encode stream chunk");
                None
            }
        }
    });
    Sse::new(events)
}
