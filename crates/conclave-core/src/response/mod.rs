//! Response Composition & Streaming
//!
//! - `ResponseComposer`: per-agent results → one `chat.completion`
//! - `StreamEncoder`: `chat.completion` → `chat.completion.chunk` frames + `[DONE]`

mod composer;
mod stream;
mod types;

pub use composer::{ResponseComposer, ResponseConfig};
pub use stream::{ChunkStream, StreamEncoder, StreamFrame, DONE_SENTINEL};
pub use types::{
    Choice, ChoiceMessage, ChunkChoice, ChunkDelta, ComposedResponse, FinishReason, ResponseId,
    StreamChunk, CHUNK_OBJECT, COMPLETION_OBJECT,
};
