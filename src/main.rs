//! Gemini Agent - Interactive CLI Entry Point
//!
//! Loads configuration, initializes logging, and runs the stdin loop.

use gemini_agent::{agent::Agent, cli, config::Config, logging};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration must load before anything else; a missing API key is
    // fatal and exits non-zero before any remote call.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to start the agent: {}", e);
            std::process::exit(1);
        }
    };

    let _guard = logging::init(&config.log_level, &config.log_dir);
    info!("Starting AI Agent application...");
    info!("Loaded configuration: model={}", config.model);

    let agent = match Agent::new(config) {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("Failed to start the agent: {}", e);
            std::process::exit(1);
        }
    };

    info!("Agent ready! Type 'quit' or 'exit' to stop.");
    cli::run(agent).await
}
