//! Error types for conclave-core
//!
//! Request-level and startup-level failures. Per-agent failures are not
//! errors at this level; see [`crate::dispatch::HandlerFailure`].

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Two catalog entries share a codename or id (startup defect)
    #[error("duplicate agent: {0}")]
    DuplicateAgent(String),

    /// Inbound payload cannot be dispatched
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Invalid configuration or persona data
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error (serialization etc.)
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(e.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Human-readable rendering of an error with a fix hint
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get a suggestion for how to fix the error
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        match self {
            Error::DuplicateAgent(name) => {
                format!("Agent '{}' is registered more than once.", name)
            }
            Error::MalformedRequest(msg) => format!("The request could not be read: {}", msg),
            Error::Configuration(msg) => format!("Configuration error: {}", msg),
            Error::Internal(msg) => format!("Internal error: {}", msg),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Error::DuplicateAgent(_) => Some(
                "Check the persona directory for two files declaring the same codename or id."
                    .to_string(),
            ),
            Error::MalformedRequest(_) => Some(
                "Send at least one message with role \"user\".".to_string(),
            ),
            Error::Configuration(_) => {
                Some("Check config/default.toml and CONCLAVE_* environment variables.".to_string())
            }
            Error::Internal(_) => None,
        }
    }
}

/// Format an error for display in the CLI
pub fn format_error_for_cli(error: &Error) -> String {
    let mut output = error.user_message();

    if let Some(suggestion) = error.suggestion() {
        output.push_str("\n\n");
        output.push_str(&suggestion);
    }

    output.push('\n');
    output
}
