//! Server module for Conclave
//!
//! # Module Structure
//!
//! - `config`: Configuration structures
//! - `loader`: Configuration loading from files and environment
//! - `validation`: Production configuration validation
//! - `shutdown`: Signal handling
//! - `init`: Catalog/pipeline construction and the run loop

pub mod config;
mod init;
mod loader;
mod shutdown;
mod validation;

pub use init::{build_pipeline, run};
pub use loader::load_config;
