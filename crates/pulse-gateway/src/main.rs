//! Pulse Gateway entry point
//!
//! Run with:
//! ```bash
//! cargo run -p pulse-gateway
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
        error!(error = %e, "Gateway failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Pulse Gateway...");

    // Load configuration
    let config = AppConfig::from_env()?;

    pulse_gateway::server::run(config).await?;
    Ok(())
}
