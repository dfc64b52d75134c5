//! Binary entrypoint.
//!
//! The crate is split into layers:
//! - domain: graph types, errors and the decomposer port
//! - usecase: orchestration + progress events
//! - infrastructure: edge-list ingestion, Kosaraju engine, serde output
//! - interface: CLI wiring

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    graph_scc::interface::cli::run().await
}
