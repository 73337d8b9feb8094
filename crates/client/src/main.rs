//! Trinity headless client binary.
//!
//! Composition root that assembles:
//! 1. Configuration from `.env` and `TRINITY_*` variables
//! 2. Content tables (a data directory or the built-in set)
//! 3. The runtime, driven by the autoplay
//!
//! # Examples
//!
//! ```bash
//! # Built-in content, fixed seed, verbose runtime logs
//! TRINITY_SEED=7 RUST_LOG=runtime=debug cargo run -p trinity-client
//! ```

use anyhow::Result;
use runtime::{Runtime, RuntimeConfig};
use trinity_client::{Autoplay, ClientConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::setup_logging()?;

    let config = ClientConfig::from_env();
    let runtime_config = RuntimeConfig::from_env()?;

    tracing::info!("Starting Trinity client");
    match &config.data_dir {
        Some(dir) => tracing::info!("Content: {}", dir.display()),
        None => tracing::info!("Content: built-in tables"),
    }
    tracing::info!("Autoplay budget: {} actions", config.max_actions);

    let content = config.load_content()?;
    let runtime = Runtime::start(content, runtime_config).await?;
    tracing::info!("Runtime started");

    let report = Autoplay::new(runtime.handle(), config).run().await?;
    tracing::info!("Autoplay finished: {}", serde_json::to_string(&report)?);

    runtime.shutdown().await?;
    tracing::info!("Client shutdown complete");
    Ok(())
}
