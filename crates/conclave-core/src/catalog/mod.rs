//! Agent Catalog
//!
//! Immutable codename → agent registry, built once at startup.
//!
//! # Example
//!
//! ```rust,ignore
//! use conclave_core::catalog::{AgentCatalog, PersonaLoader};
//!
//! let personas = PersonaLoader::new().load_all()?;
//! let catalog = AgentCatalog::from_descriptors(personas, Some("APEX"))?;
//! let apex = catalog.resolve("apex").expect("registered");
//! ```

#![forbid(unsafe_code)]

mod descriptor;
mod loader;
mod roster;

pub use descriptor::{AgentDescriptor, ReplyStyle};
pub use loader::PersonaLoader;
pub use roster::{builtin_roster, DEFAULT_CODENAME};

use crate::dispatch::{AgentHandler, PersonaHandler};
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// A registered agent: descriptor plus the handler that answers for it
#[derive(Clone)]
pub struct Agent {
    descriptor: Arc<AgentDescriptor>,
    handler: Arc<dyn AgentHandler>,
}

impl Agent {
    /// Persona descriptor
    #[must_use]
    pub fn descriptor(&self) -> &Arc<AgentDescriptor> {
        &self.descriptor
    }

    /// Reply handler
    #[must_use]
    pub fn handler(&self) -> &Arc<dyn AgentHandler> {
        &self.handler
    }

    /// Canonical codename
    #[must_use]
    pub fn codename(&self) -> &str {
        &self.descriptor.codename
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.descriptor.id)
            .field("codename", &self.descriptor.codename)
            .finish_non_exhaustive()
    }
}

/// Immutable agent registry
///
/// Lookups are exact and case-insensitive. There is no runtime registration,
/// so a shared `Arc<AgentCatalog>` needs no locking.
#[derive(Debug)]
pub struct AgentCatalog {
    /// Agents ordered by id
    agents: Vec<Agent>,
    /// Lowercased codename -> position in `agents`
    index: HashMap<String, usize>,
    /// Position of the fallback agent
    default_index: usize,
}

impl AgentCatalog {
    /// Start building a catalog
    #[must_use]
    pub fn builder() -> AgentCatalogBuilder {
        AgentCatalogBuilder::default()
    }

    /// Build a catalog where every agent uses the persona formatter
    ///
    /// # Errors
    /// - `DuplicateAgent` if two descriptors share a codename or id
    /// - `Configuration` for invalid descriptors, an empty list or an unknown default
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = AgentDescriptor>,
        default_codename: Option<&str>,
    ) -> Result<Self> {
        let handler: Arc<dyn AgentHandler> = Arc::new(PersonaHandler::new());
        let mut builder = Self::builder();
        for descriptor in descriptors {
            builder.register(descriptor, handler.clone())?;
        }
        if let Some(codename) = default_codename {
            builder.default_agent(codename);
        }
        builder.build()
    }

    /// Catalog of the built-in roster with its default agent
    ///
    /// # Errors
    /// Only if the built-in roster is inconsistent.
    pub fn builtin() -> Result<Self> {
        Self::from_descriptors(builtin_roster(), Some(DEFAULT_CODENAME))
    }

    /// Look up an agent by codename (case-insensitive, exact)
    #[must_use]
    pub fn resolve(&self, codename: &str) -> Option<&Agent> {
        self.index
            .get(&codename.to_lowercase())
            .map(|&i| &self.agents[i])
    }

    /// All descriptors, ordered by id
    pub fn all(&self) -> impl Iterator<Item = &AgentDescriptor> {
        self.agents.iter().map(|a| a.descriptor.as_ref())
    }

    /// All agents, ordered by id
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Agent used when a request mentions nobody
    #[must_use]
    pub fn default_agent(&self) -> &Agent {
        &self.agents[self.default_index]
    }

    /// Number of registered agents
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Always false for a built catalog
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Startup-time catalog builder
#[derive(Default, Debug)]
pub struct AgentCatalogBuilder {
    agents: Vec<Agent>,
    codenames: HashSet<String>,
    ids: HashSet<String>,
    default_codename: Option<String>,
}

impl AgentCatalogBuilder {
    /// Register an agent with its handler
    ///
    /// # Errors
    /// - `Configuration` if the descriptor is invalid
    /// - `DuplicateAgent` if the codename (any case) or id is already taken
    pub fn register(
        &mut self,
        descriptor: AgentDescriptor,
        handler: Arc<dyn AgentHandler>,
    ) -> Result<&mut Self> {
        descriptor.validate()?;

        if !self.codenames.insert(descriptor.key()) {
            return Err(Error::DuplicateAgent(descriptor.codename));
        }
        if !self.ids.insert(descriptor.id.clone()) {
            self.codenames.remove(&descriptor.key());
            return Err(Error::DuplicateAgent(descriptor.id));
        }

        debug!(agent = %descriptor.codename, id = %descriptor.id, "Registering agent");
        self.agents.push(Agent {
            descriptor: Arc::new(descriptor),
            handler,
        });
        Ok(self)
    }

    /// Choose the fallback agent (defaults to the first agent by id)
    pub fn default_agent(&mut self, codename: impl Into<String>) -> &mut Self {
        self.default_codename = Some(codename.into());
        self
    }

    /// Freeze the catalog
    ///
    /// # Errors
    /// - `Configuration` if nothing was registered or the default is unknown
    pub fn build(mut self) -> Result<AgentCatalog> {
        if self.agents.is_empty() {
            return Err(Error::Configuration(
                "agent catalog is empty; at least one persona is required".to_string(),
            ));
        }

        self.agents
            .sort_by(|a, b| a.descriptor.id.cmp(&b.descriptor.id));

        let index: HashMap<String, usize> = self
            .agents
            .iter()
            .enumerate()
            .map(|(i, a)| (a.descriptor.key(), i))
            .collect();

        let default_index = match &self.default_codename {
            Some(codename) => *index.get(&codename.to_lowercase()).ok_or_else(|| {
                Error::Configuration(format!(
                    "default agent '{}' is not registered",
                    codename
                ))
            })?,
            None => 0,
        };

        info!(
            agents = self.agents.len(),
            default_agent = %self.agents[default_index].descriptor.codename,
            "Agent catalog built"
        );

        Ok(AgentCatalog {
            agents: self.agents,
            index,
            default_index,
        })
    }
}

#[cfg(test)]
mod tests;
