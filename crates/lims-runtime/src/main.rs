//! LIMS runtime binary.
//!
//! Starts the sample pipeline with configuration from the environment and
//! runs until Ctrl-C.

use anyhow::{Context, Result};
use lims_runtime::container::RuntimeConfig;
use lims_runtime::LimsRuntime;
use lims_telemetry::init_telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();
    let _telemetry = init_telemetry(config.telemetry.clone())
        .context("failed to initialize telemetry")?;

    let runtime = LimsRuntime::new(config);
    runtime.start().await.context("failed to start runtime")?;

    info!("Ready. Press Ctrl-C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    runtime.shutdown().await;
    Ok(())
}
