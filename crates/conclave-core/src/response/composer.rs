//! Response composition
//!
//! Merges per-agent results into one chat completion. Failures become
//! `finish_reason = "error"` choices; they never fail the response.

use super::types::{
    Choice, ChoiceMessage, ComposedResponse, FinishReason, ResponseId, COMPLETION_OBJECT,
};
use crate::dispatch::AgentInvocationResult;
use crate::message::MessageRole;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default composite model identifier
pub(crate) const DEFAULT_MODEL: &str = "conclave";

/// Default streaming slice size (chars)
pub(crate) const DEFAULT_CHUNK_CHARS: usize = 64;

/// Response configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Model identifier reported in every response
    #[serde(default = "default_model")]
    pub model: String,
    /// Truncate replies longer than this many chars (0 = unlimited)
    #[serde(default)]
    pub max_reply_chars: usize,
    /// Upper bound on chars per streamed content chunk (0 = whole text)
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_chunk_chars() -> usize {
    DEFAULT_CHUNK_CHARS
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_reply_chars: 0,
            chunk_chars: default_chunk_chars(),
        }
    }
}

/// Builds `ComposedResponse`s
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    config: ResponseConfig,
}

impl ResponseComposer {
    /// Create a composer
    #[must_use]
    pub fn new(config: ResponseConfig) -> Self {
        Self { config }
    }

    /// Composite model identifier
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Configuration
    #[must_use]
    pub fn config(&self) -> &ResponseConfig {
        &self.config
    }

    /// Compose a response stamped with the current time
    #[must_use]
    pub fn compose(&self, id: ResponseId, results: &[AgentInvocationResult]) -> ComposedResponse {
        self.compose_at(id, Utc::now().timestamp(), results)
    }

    /// Compose a response with an explicit `created` timestamp
    #[must_use]
    pub fn compose_at(
        &self,
        id: ResponseId,
        created: i64,
        results: &[AgentInvocationResult],
    ) -> ComposedResponse {
        let choices: Vec<Choice> = results
            .iter()
            .enumerate()
            .map(|(index, result)| self.choice(index as u32, result))
            .collect();

        debug!(
            request_id = %id,
            choices = choices.len(),
            errors = choices
                .iter()
                .filter(|c| c.finish_reason == FinishReason::Error)
                .count(),
            "Composed response"
        );

        ComposedResponse {
            id,
            object: COMPLETION_OBJECT.to_string(),
            created,
            model: self.config.model.clone(),
            choices,
        }
    }

    fn choice(&self, index: u32, result: &AgentInvocationResult) -> Choice {
        let (content, finish_reason) = match result {
            AgentInvocationResult::Reply { text, .. } => {
                match truncate_chars(text, self.config.max_reply_chars) {
                    Some(cut) => (cut.to_string(), FinishReason::Length),
                    None => (text.clone(), FinishReason::Stop),
                }
            }
            AgentInvocationResult::Failure { agent, failure } => {
                (failure.diagnostic(&agent.codename), FinishReason::Error)
            }
        };

        Choice {
            index,
            message: ChoiceMessage {
                role: MessageRole::Assistant,
                content,
            },
            finish_reason,
        }
    }
}

/// Prefix of `text` with `max` chars, or `None` if it already fits
fn truncate_chars(text: &str, max: usize) -> Option<&str> {
    if max == 0 {
        return None;
    }
    text.char_indices().nth(max).map(|(i, _)| &text[..i])
}
