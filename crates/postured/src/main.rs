//! Postured - Posture analysis daemon
//!
//! Accepts questionnaire submissions, forwards them to the completion
//! gateway and serves back validated analysis results.

use std::sync::Arc;

use anyhow::Result;
use postured::analyzer::Analyzer;
use postured::config::Config;
use postured::server::{self, AppState};
use posture_common::llm_client::HttpCompletionClient;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Postured v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    let client = HttpCompletionClient::new(config.completion_config())
        .map_err(|e| anyhow::anyhow!("failed to build completion client: {e}"))?;
    let analyzer = Analyzer::new(Arc::new(client));

    server::run(AppState::new(analyzer), &config.server.bind).await
}
