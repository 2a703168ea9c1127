//! Delivery Time Predictor - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use model_runtime::ModelRuntime;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Delivery Time Predictor v{} ===", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Artifact load failures are fatal: nothing is served without a model.
    let runtime = ModelRuntime::load(&config.artifact_dir)
        .context("Failed to load model artifacts")?;

    run_server(config, runtime).await
}
