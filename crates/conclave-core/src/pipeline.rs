//! Chat pipeline
//!
//! Ties dispatch, composition and streaming together for one request.
//! The transport layer holds one `ChatPipeline` behind an `Arc`.

use crate::catalog::AgentCatalog;
use crate::dispatch::{DispatchConfig, Dispatcher};
use crate::error::Result;
use crate::message::InboundRequest;
use crate::response::{
    ChunkStream, ComposedResponse, ResponseComposer, ResponseConfig, ResponseId, StreamEncoder,
};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Request → composed response
pub struct ChatPipeline {
    dispatcher: Dispatcher,
    composer: ResponseComposer,
    encoder: StreamEncoder,
}

impl ChatPipeline {
    /// Create a pipeline over a catalog
    #[must_use]
    pub fn new(catalog: Arc<AgentCatalog>, dispatch: DispatchConfig, response: ResponseConfig) -> Self {
        let encoder = StreamEncoder::new(response.chunk_chars);
        Self {
            dispatcher: Dispatcher::new(catalog, dispatch),
            composer: ResponseComposer::new(response),
            encoder,
        }
    }

    /// Parent every dispatch on `token`
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.dispatcher = self.dispatcher.with_cancel_token(token);
        self
    }

    /// Shared catalog
    #[must_use]
    pub fn catalog(&self) -> &Arc<AgentCatalog> {
        self.dispatcher.catalog()
    }

    /// Dispatcher
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Composite model identifier
    #[must_use]
    pub fn model(&self) -> &str {
        self.composer.model()
    }

    /// Dispatch and compose
    ///
    /// # Errors
    /// `MalformedRequest` when the request has no usable user message.
    pub async fn respond(&self, request: &InboundRequest) -> Result<ComposedResponse> {
        let token = self.dispatcher.cancel_token();
        self.respond_with(request, &token).await
    }

    /// Dispatch and compose under a caller-provided cancellation token
    ///
    /// # Errors
    /// `MalformedRequest` when the request has no usable user message.
    pub async fn respond_with(
        &self,
        request: &InboundRequest,
        cancel: &CancellationToken,
    ) -> Result<ComposedResponse> {
        let start = Instant::now();
        let results = self.dispatcher.dispatch_with(request, cancel).await?;
        let response = self.composer.compose(ResponseId::generate(), &results);

        info!(
            request_id = %response.id,
            choices = response.choices.len(),
            stream = request.stream,
            duration_ms = start.elapsed().as_millis() as u64,
            "Request answered"
        );

        Ok(response)
    }

    /// Encode a composed response as chunk frames
    #[must_use]
    pub fn stream(&self, response: ComposedResponse) -> ChunkStream {
        self.encoder.encode(response)
    }

    /// Cancel every in-flight request
    pub fn cancel(&self) {
        self.dispatcher.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::response::{FinishReason, StreamFrame};
    use tokio_test::{assert_err, assert_ok};

    fn pipeline() -> ChatPipeline {
        let catalog = Arc::new(AgentCatalog::builtin().unwrap());
        ChatPipeline::new(catalog, DispatchConfig::default(), ResponseConfig::default())
    }

    #[tokio::test]
    async fn test_respond_two_agents() {
        let response = pipeline()
            .respond(&InboundRequest::from_user_text(
                "@APEX @CIPHER review this function",
            ))
            .await
            .unwrap();

        assert_eq!(response.choices.len(), 2);
        assert!(response.choices[0].message.content.starts_with("**APEX**"));
        assert!(response.choices[1].message.content.starts_with("**CIPHER**"));
        assert!(response
            .choices
            .iter()
            .all(|c| c.finish_reason == FinishReason::Stop));
        assert!(response.id.as_str().starts_with("chatcmpl-"));
    }

    #[tokio::test]
    async fn test_respond_defaults_to_apex() {
        let response = assert_ok!(
            pipeline()
                .respond(&InboundRequest::from_user_text("hello there"))
                .await
        );

        assert_eq!(response.choices.len(), 1);
        assert!(response.choices[0].message.content.starts_with("**APEX**"));
    }

    #[tokio::test]
    async fn test_respond_blank_message_defaults_to_apex() {
        let p = pipeline();
        for text in ["", "   "] {
            let response = assert_ok!(p.respond(&InboundRequest::from_user_text(text)).await);

            assert_eq!(response.choices.len(), 1);
            assert_eq!(response.choices[0].finish_reason, FinishReason::Stop);
            assert!(response.choices[0].message.content.starts_with("**APEX**"));
        }
    }

    #[tokio::test]
    async fn test_respond_rejects_empty_request() {
        let err = assert_err!(pipeline().respond(&InboundRequest::default()).await);
        assert!(matches!(err, Error::MalformedRequest(_)));
    }

    #[tokio::test]
    async fn test_stream_ends_with_sentinel() {
        let p = pipeline();
        let response = p
            .respond(&InboundRequest::from_user_text("@AXIOM prove it").streaming(true))
            .await
            .unwrap();

        let frames: Vec<StreamFrame> = p.stream(response).collect();
        assert_eq!(frames.last(), Some(&StreamFrame::Done));
        assert!(frames.len() >= 4);
    }
}
