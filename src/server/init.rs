//! Server initialization
//!
//! Contains the main `run()` function: config → catalog → pipeline → router.

use super::config::AppConfig;
use super::loader::load_config;
use super::shutdown::shutdown_signal;
use super::validation::validate_production_config;
use anyhow::{Context, Result};
use conclave_core::{builtin_roster, AgentCatalog, ChatPipeline, PersonaLoader};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Build the agent catalog from persona files, or the built-in roster
pub fn build_catalog(config: &AppConfig) -> Result<AgentCatalog> {
    let loader = PersonaLoader::with_path(&config.personas.dir);
    let mut descriptors = if loader.is_present() {
        loader
            .load_all()
            .context("Failed to load persona files")?
    } else {
        Vec::new()
    };

    if descriptors.is_empty() {
        info!("No persona files in {:?}, using built-in roster", loader.persona_dir());
        descriptors = builtin_roster();
    }

    AgentCatalog::from_descriptors(descriptors, config.dispatch.default_agent.as_deref())
        .context("Failed to build agent catalog")
}

/// Build the request pipeline
pub fn build_pipeline(config: &AppConfig, shutdown: CancellationToken) -> Result<Arc<ChatPipeline>> {
    let catalog = Arc::new(build_catalog(config)?);
    let pipeline = ChatPipeline::new(catalog, config.dispatch.limits(), config.response.clone())
        .with_cancel_token(shutdown);
    Ok(Arc::new(pipeline))
}

/// Run the server
pub async fn run() -> Result<()> {
    let config = load_config()?;
    validate_production_config(&config);

    let shutdown = CancellationToken::new();
    let pipeline = build_pipeline(&config, shutdown.clone())?;

    info!(
        agents = pipeline.catalog().len(),
        default_agent = %pipeline.catalog().default_agent().codename(),
        model = %pipeline.model(),
        "Agent catalog ready"
    );

    let app = crate::api::router(pipeline);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("HTTP server error")?;

    info!("Conclave shutdown complete");
    Ok(())
}
