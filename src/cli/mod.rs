//! CLI module for Conclave
//!
//! - `serve`: Start the HTTP server (default)
//! - `agents`: Print the agent roster
//! - `ask`: Run one dispatch locally

use clap::{Parser, Subcommand};

pub mod agents;
pub mod ask;

/// Conclave multi-agent chat extension
#[derive(Parser, Debug)]
#[command(name = "conclave")]
#[command(about = "Multi-agent @mention dispatch with OpenAI-compatible responses")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server (default)
    Serve,
    /// List registered agents
    Agents,
    /// Send one message and print the response
    Ask {
        /// Print SSE frames instead of the JSON response
        #[arg(long)]
        stream: bool,
        /// Message text, e.g. "@APEX @CIPHER review this function"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Agents) => agents::run(),
        Some(Commands::Ask { stream, text }) => ask::run(&text.join(" "), stream).await,
        Some(Commands::Serve) | None => crate::server::run().await,
    }
}
