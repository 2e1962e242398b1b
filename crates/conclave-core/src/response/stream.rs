//! Streaming encoder
//!
//! Turns a `ComposedResponse` into OpenAI-style `chat.completion.chunk` frames.
//! Each choice goes through `Start -> RoleSent -> Content* -> Finished -> Closed`
//! before the next one starts; the `[DONE]` sentinel comes last.

use super::types::{
    Choice, ChunkChoice, ChunkDelta, ComposedResponse, FinishReason, ResponseId, StreamChunk,
    CHUNK_OBJECT,
};
use crate::error::Result;
use crate::message::MessageRole;
use std::iter::FusedIterator;

/// Payload of the terminating frame
pub const DONE_SENTINEL: &str = "[DONE]";

/// One server-sent frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    /// A chunk
    Chunk(StreamChunk),
    /// End of stream
    Done,
}

impl StreamFrame {
    /// Whether this is the sentinel
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// `data:` payload: chunk JSON or `[DONE]`
    ///
    /// # Errors
    /// `Internal` if the chunk cannot be serialized.
    pub fn to_sse_data(&self) -> Result<String> {
        match self {
            Self::Chunk(chunk) => Ok(serde_json::to_string(chunk)?),
            Self::Done => Ok(DONE_SENTINEL.to_string()),
        }
    }

    /// Full wire form: `data: <payload>\n\n`
    ///
    /// # Errors
    /// `Internal` if the chunk cannot be serialized.
    pub fn to_sse_line(&self) -> Result<String> {
        Ok(format!("data: {}\n\n", self.to_sse_data()?))
    }
}

/// Builds chunk streams
#[derive(Debug, Clone, Copy)]
pub struct StreamEncoder {
    chunk_chars: usize,
}

impl StreamEncoder {
    /// Create an encoder; `chunk_chars = 0` sends each text in one chunk
    #[must_use]
    pub fn new(chunk_chars: usize) -> Self {
        Self { chunk_chars }
    }

    /// Chunk size bound
    #[must_use]
    pub fn chunk_chars(&self) -> usize {
        self.chunk_chars
    }

    /// Lazily encode `response`
    #[must_use]
    pub fn encode(&self, response: ComposedResponse) -> ChunkStream {
        ChunkStream {
            id: response.id,
            created: response.created,
            model: response.model,
            chunk_chars: self.chunk_chars,
            pending: response.choices.into_iter(),
            state: State::Start,
        }
    }
}

/// Where the stream is
#[derive(Debug)]
enum State {
    /// Next choice not yet announced
    Start,
    /// Role sent for `choice`; content slices come next
    RoleSent(Choice),
    /// Emitting content slices
    Content {
        index: u32,
        slices: std::vec::IntoIter<String>,
        finish_reason: FinishReason,
    },
    /// Every slice sent; finish chunk next
    Finished { index: u32, finish_reason: FinishReason },
    /// Sentinel sent
    Closed,
}

/// Lazy, finite frame sequence for one response
///
/// Not restartable: once consumed it yields `None` forever.
#[derive(Debug)]
pub struct ChunkStream {
    id: ResponseId,
    created: i64,
    model: String,
    chunk_chars: usize,
    pending: std::vec::IntoIter<Choice>,
    state: State,
}

impl ChunkStream {
    fn chunk(&self, index: u32, delta: ChunkDelta, finish_reason: Option<FinishReason>) -> StreamFrame {
        StreamFrame::Chunk(StreamChunk {
            id: self.id.clone(),
            object: CHUNK_OBJECT.to_string(),
            created: self.created,
            model: self.model.clone(),
            choices: vec![ChunkChoice {
                index,
                delta,
                finish_reason,
            }],
        })
    }
}

impl Iterator for ChunkStream {
    type Item = StreamFrame;

    fn next(&mut self) -> Option<StreamFrame> {
        loop {
            match std::mem::replace(&mut self.state, State::Closed) {
                State::Start => match self.pending.next() {
                    Some(choice) => {
                        let frame = self.chunk(
                            choice.index,
                            ChunkDelta {
                                role: Some(MessageRole::Assistant),
                                content: Some(String::new()),
                            },
                            None,
                        );
                        self.state = State::RoleSent(choice);
                        return Some(frame);
                    }
                    None => return Some(StreamFrame::Done),
                },
                State::RoleSent(choice) => {
                    let slices: Vec<String> = split_for_stream(&choice.message.content, self.chunk_chars)
                        .into_iter()
                        .map(str::to_string)
                        .collect();
                    self.state = State::Content {
                        index: choice.index,
                        slices: slices.into_iter(),
                        finish_reason: choice.finish_reason,
                    };
                }
                State::Content {
                    index,
                    mut slices,
                    finish_reason,
                } => match slices.next() {
                    Some(slice) => {
                        let frame = self.chunk(
                            index,
                            ChunkDelta {
                                role: None,
                                content: Some(slice),
                            },
                            None,
                        );
                        self.state = State::Content {
                            index,
                            slices,
                            finish_reason,
                        };
                        return Some(frame);
                    }
                    None => self.state = State::Finished { index, finish_reason },
                },
                State::Finished { index, finish_reason } => {
                    let frame = self.chunk(index, ChunkDelta::default(), Some(finish_reason));
                    self.state = State::Start;
                    return Some(frame);
                }
                State::Closed => return None,
            }
        }
    }
}

impl FusedIterator for ChunkStream {}

/// Split `text` into slices of at most `max_chars` chars
///
/// Cuts after the last whitespace inside the window when there is one.
/// Concatenating the slices yields `text`; empty text yields one empty slice.
pub(crate) fn split_for_stream(text: &str, max_chars: usize) -> Vec<&str> {
    if max_chars == 0 {
        return vec![text];
    }

    let mut slices = Vec::new();
    let mut rest = text;
    while let Some((limit, _)) = rest.char_indices().nth(max_chars) {
        let window = &rest[..limit];
        let cut = window
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(limit, |(i, c)| i + c.len_utf8());
        slices.push(&rest[..cut]);
        rest = &rest[cut..];
    }
    if !rest.is_empty() || slices.is_empty() {
        slices.push(rest);
    }
    slices
}
