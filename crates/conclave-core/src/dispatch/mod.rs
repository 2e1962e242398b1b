//! Agent Dispatch
//!
//! Resolves the agents a request addresses and invokes each one.
//!
//! ## Failure isolation
//!
//! - Handler errors, panics and timeouts become `HandlerFailure` results
//! - Invocations run concurrently; results keep resolution order
//! - A `CancellationToken` stops waiting on unfinished agents

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

mod handler;
mod types;

pub use handler::{AgentHandler, PersonaHandler};
pub use types::{AgentInvocationResult, DispatchConfig, HandlerFailure, HandlerResult};

use crate::catalog::{Agent, AgentCatalog};
use crate::error::Result;
use crate::mention::MentionParser;
use crate::message::InboundRequest;

/// Invokes agent handlers for a request
pub struct Dispatcher {
    /// Shared, immutable catalog
    catalog: Arc<AgentCatalog>,
    /// Configuration
    config: DispatchConfig,
    /// Parent token for every dispatch
    cancel_token: CancellationToken,
}

impl Dispatcher {
    /// Create a dispatcher over a catalog
    #[must_use]
    pub fn new(catalog: Arc<AgentCatalog>, config: DispatchConfig) -> Self {
        Self {
            catalog,
            config,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Use an externally owned token (e.g. the server shutdown token) as parent
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Shared catalog
    #[must_use]
    pub fn catalog(&self) -> &Arc<AgentCatalog> {
        &self.catalog
    }

    /// Configuration
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Get a child cancellation token for one request
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.child_token()
    }

    /// Cancel every in-flight dispatch
    pub fn cancel(&self) {
        info!("Cancelling all agent dispatches");
        self.cancel_token.cancel();
    }

    /// Resolve the agents a request addresses
    ///
    /// Falls back to the catalog default when nothing resolves.
    ///
    /// # Errors
    /// `MalformedRequest` if the request has no usable user message.
    pub fn resolve(&self, request: &InboundRequest) -> Result<Vec<Agent>> {
        let parser = MentionParser::new(&self.catalog);
        let mut agents: Vec<Agent> = parser
            .parse_request(request)?
            .into_iter()
            .cloned()
            .collect();

        if agents.is_empty() {
            let fallback = self.catalog.default_agent();
            debug!(agent = %fallback.codename(), "No mentions resolved, using default agent");
            agents.push(fallback.clone());
        }

        let cap = self.config.max_agents_per_request;
        if cap > 0 && agents.len() > cap {
            warn!(
                requested = agents.len(),
                max = cap,
                "Too many agents mentioned, keeping the first ones"
            );
            agents.truncate(cap);
        }

        Ok(agents)
    }

    /// Invoke one agent; never fails
    pub async fn invoke(&self, agent: &Agent, request: &InboundRequest) -> AgentInvocationResult {
        let token = self.cancel_token();
        self.invoke_with(agent, request, &token).await
    }

    /// Invoke one agent under a caller-provided cancellation token
    pub async fn invoke_with(
        &self,
        agent: &Agent,
        request: &InboundRequest,
        cancel: &CancellationToken,
    ) -> AgentInvocationResult {
        let descriptor = agent.descriptor().clone();
        let start = Instant::now();

        debug!(agent = %descriptor.codename, "Invoking agent");

        let call = AssertUnwindSafe(agent.handler().reply(&descriptor, request)).catch_unwind();
        let guarded = async {
            match self.config.agent_timeout() {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(outcome) => settle(outcome),
                    Err(_) => Err(HandlerFailure::Timeout(limit)),
                },
                None => settle(call.await),
            }
        };

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(HandlerFailure::Cancelled),
            outcome = guarded => outcome,
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        match &outcome {
            Ok(text) => info!(
                agent = %descriptor.codename,
                duration_ms = duration_ms,
                chars = text.len(),
                "Agent replied"
            ),
            Err(failure) => warn!(
                agent = %descriptor.codename,
                duration_ms = duration_ms,
                error = %failure,
                "Agent failed"
            ),
        }

        AgentInvocationResult::from_outcome(descriptor, outcome)
    }

    /// Resolve and invoke every addressed agent
    ///
    /// # Errors
    /// `MalformedRequest` only; per-agent failures are embedded in the results.
    pub async fn dispatch(&self, request: &InboundRequest) -> Result<Vec<AgentInvocationResult>> {
        let token = self.cancel_token();
        self.dispatch_with(request, &token).await
    }

    /// Resolve and invoke under a caller-provided cancellation token
    ///
    /// Results are ordered by resolution order, not completion order.
    pub async fn dispatch_with(
        &self,
        request: &InboundRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<AgentInvocationResult>> {
        let agents = self.resolve(request)?;

        info!(
            agents = ?agents.iter().map(Agent::codename).collect::<Vec<_>>(),
            "Dispatching request"
        );

        let calls = agents
            .iter()
            .map(|agent| self.invoke_with(agent, request, cancel));

        Ok(futures::future::join_all(calls).await)
    }
}

/// Flatten a caught handler outcome
fn settle(outcome: std::thread::Result<HandlerResult<String>>) -> HandlerResult<String> {
    match outcome {
        Ok(result) => result,
        Err(_) => Err(HandlerFailure::Panicked),
    }
}

#[cfg(test)]
mod tests;
