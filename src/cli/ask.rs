//! `conclave ask`

use crate::server::{build_pipeline, load_config};
use anyhow::{Context, Result};
use conclave_core::{format_error_for_cli, InboundRequest};
use tokio_util::sync::CancellationToken;

/// Dispatch `text` once and print the result to stdout
pub async fn run(text: &str, stream: bool) -> Result<()> {
    let config = load_config()?;
    let pipeline = build_pipeline(&config, CancellationToken::new())?;

    let request = InboundRequest::from_user_text(text).streaming(stream);
    let response = match pipeline.respond(&request).await {
        Ok(response) => response,
        Err(e) => {
            eprint!("{}", format_error_for_cli(&e));
            return Err(e.into());
        }
    };

    if stream {
        for frame in pipeline.stream(response) {
            print!("{}", frame.to_sse_line()?);
        }
    } else {
        let json = serde_json::to_string_pretty(&response).context("Failed to encode response")?;
        println!("{json}");
    }

    Ok(())
}
