//! Conclave Core - Multi-Agent Dispatch Engine
//!
//! This crate provides the request path behind the Conclave chat extension:
//! - Catalog: immutable registry of agent personas and their handlers
//! - Mention: `@CODENAME` extraction from the newest user turn
//! - Dispatch: concurrent per-agent invocation with failure isolation
//! - Response: chat-completion composition and streaming chunk encoding
//!
//! ```text
//! InboundRequest ─▶ MentionParser ─▶ Dispatcher ─▶ ResponseComposer ─▶ StreamEncoder
//!                        │               │
//!                        └── AgentCatalog┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod mention;
pub mod message;
pub mod pipeline;
pub mod response;

pub use catalog::{
    builtin_roster, Agent, AgentCatalog, AgentCatalogBuilder, AgentDescriptor, PersonaLoader,
    ReplyStyle,
};
pub use dispatch::{
    AgentHandler, AgentInvocationResult, DispatchConfig, Dispatcher, HandlerFailure,
    HandlerResult, PersonaHandler,
};
pub use error::{format_error_for_cli, Error, Result, UserFriendlyError};
pub use mention::{scan_mentions, strip_mentions, Mention, MentionParser};
pub use message::{ConversationMessage, InboundRequest, MessageRole};
pub use pipeline::ChatPipeline;
pub use response::{
    ChunkChoice, ChunkDelta, ChunkStream, Choice, ChoiceMessage, ComposedResponse, FinishReason,
    ResponseComposer, ResponseConfig, ResponseId, StreamChunk, StreamEncoder, StreamFrame,
};
