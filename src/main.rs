//! Volcano Dashboard Server
//!
//! Run with: cargo run --bin volcano [-- path/to/config.toml]
//!
//! # Configuration
//!
//! Config file (first argument, or the default search path) plus
//! environment overrides:
//! - `VOLCANO_DATA_SOURCE`: Summary file path or URL (default: ./public/data.json)
//! - `VOLCANO_HOST`: Host to bind to (default: 0.0.0.0)
//! - `VOLCANO_PORT`: Port to listen on (default: 3000)
//! - `VOLCANO_LOG_LEVEL`, `VOLCANO_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter, overrides the level above

use anyhow::Context;
use std::path::PathBuf;

use volcano::api::{serve, AppState};
use volcano::config::Config;
use volcano::dashboard::spawn_initial_load;
use volcano::summary::SummaryLoader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            Config::load_with_env(&path)
                .with_context(|| format!("loading config from {}", path.display()))?
        }
        None => Config::load_default(),
    };

    config.logging.init();

    tracing::info!("Starting Volcano dashboard v{}", env!("CARGO_PKG_VERSION"));

    let source = config.data.summary_source();
    tracing::info!("Summary source: {}", source);

    let loader = SummaryLoader::new(source.clone(), config.data.loader_config())
        .context("creating summary loader")?;

    let mut state = AppState::new(config.dashboard.clone(), config.server.clone());
    if let Some(path) = source.as_path() {
        state = state.with_data_file(path.clone());
    }

    // One load per mount, never cancelled; a failure leaves the page loading
    spawn_initial_load(state.dashboard.clone(), loader);

    serve(state).await?;

    tracing::info!("Volcano dashboard stopped");

    Ok(())
}
