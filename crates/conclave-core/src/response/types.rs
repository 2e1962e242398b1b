use crate::message::MessageRole;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// `object` value of a complete response
pub const COMPLETION_OBJECT: &str = "chat.completion";

/// `object` value of a streaming chunk
pub const CHUNK_OBJECT: &str = "chat.completion.chunk";

/// Why a choice ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishReason {
    /// Agent replied
    Stop,
    /// Agent failed; content is a diagnostic
    Error,
    /// Reply was truncated
    Length,
}

/// Response identifier, unique per composed response
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(String);

impl ResponseId {
    /// Fresh random id (`chatcmpl-<uuid>`)
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("chatcmpl-{}", Uuid::new_v4().simple()))
    }

    /// Wrap an existing id
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as str
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message carried by a choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    /// Always `assistant`
    pub role: MessageRole,
    /// Reply or diagnostic text
    pub content: String,
}

/// One agent's contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Position in resolution order
    pub index: u32,
    /// Assistant message
    pub message: ChoiceMessage,
    /// Why the choice ended
    pub finish_reason: FinishReason,
}

/// Non-streaming chat completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedResponse {
    /// Response id
    pub id: ResponseId,
    /// Always `chat.completion`
    pub object: String,
    /// Unix timestamp (seconds)
    pub created: i64,
    /// Composite model identifier
    pub model: String,
    /// One choice per invoked agent
    pub choices: Vec<Choice>,
}

/// Incremental delta in a chunk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkDelta {
    /// Set on the role-announcement chunk only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MessageRole>,
    /// Text slice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Choice entry in a chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkChoice {
    /// Choice index
    pub index: u32,
    /// Delta
    pub delta: ChunkDelta,
    /// Set on the final chunk of an index
    pub finish_reason: Option<FinishReason>,
}

/// Streaming chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Shared by every chunk of one response
    pub id: ResponseId,
    /// Always `chat.completion.chunk`
    pub object: String,
    /// Unix timestamp (seconds)
    pub created: i64,
    /// Composite model identifier
    pub model: String,
    /// Exactly one entry
    pub choices: Vec<ChunkChoice>,
}

impl StreamChunk {
    /// The single choice entry
    #[must_use]
    pub fn choice(&self) -> Option<&ChunkChoice> {
        self.choices.first()
    }
}
