//! Server configuration types
//!
//! Mirrors the sections of `config/default.toml`.

use conclave_core::{DispatchConfig, ResponseConfig};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dispatch: DispatchAppConfig,
    #[serde(default)]
    pub response: ResponseConfig,
    #[serde(default)]
    pub personas: PersonasConfig,
}

/// HTTP listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Dispatch configuration (exposed to TOML)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchAppConfig {
    /// Codename answering unaddressed messages; first agent by id when unset
    #[serde(default)]
    pub default_agent: Option<String>,
    #[serde(default = "default_agent_timeout_secs")]
    pub agent_timeout_secs: u64,
    #[serde(default = "default_max_agents")]
    pub max_agents_per_request: usize,
}

fn default_agent_timeout_secs() -> u64 {
    DispatchConfig::default().agent_timeout_secs
}

fn default_max_agents() -> usize {
    DispatchConfig::default().max_agents_per_request
}

impl Default for DispatchAppConfig {
    fn default() -> Self {
        Self {
            default_agent: None,
            agent_timeout_secs: default_agent_timeout_secs(),
            max_agents_per_request: default_max_agents(),
        }
    }
}

impl DispatchAppConfig {
    /// Core dispatcher limits
    pub fn limits(&self) -> DispatchConfig {
        DispatchConfig {
            agent_timeout_secs: self.agent_timeout_secs,
            max_agents_per_request: self.max_agents_per_request,
        }
    }
}

/// Persona files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonasConfig {
    #[serde(default = "default_persona_dir")]
    pub dir: String,
}

fn default_persona_dir() -> String {
    "config/personas".to_string()
}

impl Default for PersonasConfig {
    fn default() -> Self {
        Self {
            dir: default_persona_dir(),
        }
    }
}
