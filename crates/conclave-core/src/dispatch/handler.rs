//! Agent handlers
//!
//! `AgentHandler` is the per-agent capability stored in the catalog.
//! `PersonaHandler` is the uniform formatter every built-in persona uses.

use super::types::HandlerResult;
use crate::catalog::{AgentDescriptor, ReplyStyle};
use crate::mention::strip_mentions;
use crate::message::{InboundRequest, MessageRole};
use async_trait::async_trait;

/// Produces one agent's reply
///
/// Every handler of a request sees the same `InboundRequest`. Handlers must not
/// mutate shared state.
#[async_trait]
pub trait AgentHandler: Send + Sync {
    /// Reply on behalf of `agent`
    async fn reply(&self, agent: &AgentDescriptor, request: &InboundRequest)
        -> HandlerResult<String>;
}

/// Template-driven persona reply
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonaHandler;

impl PersonaHandler {
    /// Create the formatter
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render a reply for `task`
    ///
    /// # Arguments
    /// * `agent` - Persona to speak as
    /// * `task` - User text with mentions removed
    /// * `earlier_turns` - Non-system messages before the newest user turn
    #[must_use]
    pub fn render(agent: &AgentDescriptor, task: &str, earlier_turns: usize) -> String {
        let mut out = format!(
            "**{}** · {} · Tier {}\n\n> {}\n\n",
            agent.codename,
            agent.display_title(),
            agent.tier,
            agent.philosophy
        );

        let task_line = if task.is_empty() {
            format!("(no task given; specialty: {})", agent.specialty)
        } else {
            task.to_string()
        };

        let (heading, list_title) = match agent.style {
            ReplyStyle::Standard => ("Task", "Approach"),
            ReplyStyle::Review => ("Review of", "Checklist"),
            ReplyStyle::Blueprint => ("Blueprint for", "Layers"),
            ReplyStyle::Audit => ("Security audit of", "Findings to verify"),
        };
        out.push_str(&format!("{heading}: {task_line}\n\n{list_title}:"));

        for (i, directive) in agent.directives.iter().enumerate() {
            let n = i + 1;
            let line = match agent.style {
                ReplyStyle::Standard => format!("\n{n}. {directive}"),
                ReplyStyle::Review => format!("\n- [ ] {directive}"),
                ReplyStyle::Blueprint => format!("\nLayer {n}: {directive}"),
                ReplyStyle::Audit => format!("\n- [{}] {directive}", severity(i)),
            };
            out.push_str(&line);
        }
        if agent.directives.is_empty() {
            out.push_str(&format!("\n- {}", agent.specialty));
        }

        if earlier_turns > 0 {
            out.push_str(&format!(
                "\n\n_Context: {earlier_turns} earlier message(s) considered._"
            ));
        }

        out
    }
}

/// Audit findings are listed most severe first
fn severity(position: usize) -> &'static str {
    match position {
        0 => "critical",
        1 => "high",
        _ => "medium",
    }
}

#[async_trait]
impl AgentHandler for PersonaHandler {
    async fn reply(
        &self,
        agent: &AgentDescriptor,
        request: &InboundRequest,
    ) -> HandlerResult<String> {
        let last_user = request
            .messages
            .iter()
            .rposition(|m| m.role == MessageRole::User);

        let task = last_user
            .map(|i| strip_mentions(&request.messages[i].content))
            .unwrap_or_default();

        let earlier_turns = last_user
            .map(|i| {
                request.messages[..i]
                    .iter()
                    .filter(|m| m.role != MessageRole::System)
                    .count()
            })
            .unwrap_or(0);

        Ok(Self::render(agent, &task, earlier_turns))
    }
}
