//! Production configuration validation

use super::config::AppConfig;
use super::loader::environment;
use tracing::warn;

/// Warn about risky settings when running with `CONCLAVE_ENV=production`
pub fn validate_production_config(config: &AppConfig) {
    if environment().to_lowercase() != "production" {
        return;
    }

    if config.server.host == "0.0.0.0" {
        warn!(
            "SECURITY WARNING: Server is binding to all interfaces (0.0.0.0) in production. \
             Consider binding to 127.0.0.1 and using a reverse proxy."
        );
    }

    if config.dispatch.agent_timeout_secs == 0 {
        warn!("Agent timeout is disabled in production; a stuck agent will hold its request open");
    }
}
