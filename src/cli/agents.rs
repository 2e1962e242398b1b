//! `conclave agents`

use crate::server::{build_pipeline, load_config};
use anyhow::Result;
use tokio_util::sync::CancellationToken;

/// Print the roster, default agent marked
pub fn run() -> Result<()> {
    let config = load_config()?;
    let pipeline = build_pipeline(&config, CancellationToken::new())?;
    let catalog = pipeline.catalog();
    let default = catalog.default_agent().codename();

    println!("\nConclave roster ({} agents)\n", catalog.len());

    for agent in catalog.all() {
        let marker = if agent.codename == default { "  (default)" } else { "" };
        println!(
            "  {:12} @{:<10} Tier {}  {} [{}]{}",
            agent.id,
            agent.codename,
            agent.tier,
            agent.display_title(),
            agent.style,
            marker
        );
    }

    println!();
    Ok(())
}
