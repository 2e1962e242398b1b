use crate::catalog::AgentDescriptor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Default per-agent timeout (seconds)
pub(crate) const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 30;

/// Default cap on agents addressed by one request
pub(crate) const DEFAULT_MAX_AGENTS: usize = 8;

/// Why one agent could not answer
///
/// Never escalated to a request-level error; the composer embeds it as a
/// degraded choice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerFailure {
    /// Handler returned an error
    #[error("{0}")]
    Failed(String),

    /// Handler exceeded the per-agent timeout
    #[error("handler timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Handler panicked
    #[error("handler crashed")]
    Panicked,

    /// Request was cancelled before the handler finished
    #[error("request was cancelled")]
    Cancelled,
}

impl HandlerFailure {
    /// Short user-facing diagnostic naming the agent
    #[must_use]
    pub fn diagnostic(&self, codename: &str) -> String {
        format!("[{codename}] is unavailable: {self}")
    }
}

/// Handler result type
pub type HandlerResult<T> = std::result::Result<T, HandlerFailure>;

/// Outcome of invoking one agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentInvocationResult {
    /// Agent produced a reply
    Reply {
        /// Agent that answered
        agent: Arc<AgentDescriptor>,
        /// Reply text
        text: String,
    },
    /// Agent failed; isolated from the other agents
    Failure {
        /// Agent that failed
        agent: Arc<AgentDescriptor>,
        /// Failure cause
        failure: HandlerFailure,
    },
}

impl AgentInvocationResult {
    /// Build from a handler outcome
    #[must_use]
    pub fn from_outcome(agent: Arc<AgentDescriptor>, outcome: HandlerResult<String>) -> Self {
        match outcome {
            Ok(text) => Self::Reply { agent, text },
            Err(failure) => Self::Failure { agent, failure },
        }
    }

    /// Agent this result belongs to
    #[must_use]
    pub fn agent(&self) -> &AgentDescriptor {
        match self {
            Self::Reply { agent, .. } | Self::Failure { agent, .. } => agent,
        }
    }

    /// Whether the agent answered
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Reply { .. })
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Per-agent timeout in seconds (0 = no limit)
    #[serde(default = "default_agent_timeout_secs")]
    pub agent_timeout_secs: u64,
    /// Maximum distinct agents per request (0 = unlimited)
    #[serde(default = "default_max_agents")]
    pub max_agents_per_request: usize,
}

fn default_agent_timeout_secs() -> u64 {
    DEFAULT_AGENT_TIMEOUT_SECS
}

fn default_max_agents() -> usize {
    DEFAULT_MAX_AGENTS
}

impl DispatchConfig {
    /// Per-agent timeout, if any
    #[must_use]
    pub fn agent_timeout(&self) -> Option<Duration> {
        (self.agent_timeout_secs > 0).then(|| Duration::from_secs(self.agent_timeout_secs))
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            agent_timeout_secs: default_agent_timeout_secs(),
            max_agents_per_request: default_max_agents(),
        }
    }
}
