//! Pulse API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p pulse-api
//! ```
//!
//! Configuration is loaded from environment variables.

use pulse_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing(TracingConfig::default()) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Pulse API Server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    pulse_api::run(config).await?;
    Ok(())
}
