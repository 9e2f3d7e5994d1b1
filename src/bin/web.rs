//! Gemini Agent - Web UI Entry Point
//!
//! Starts the HTTP server that serves the browser chat UI.

use gemini_agent::{api, config::Config, logging};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to start the agent: {}", e);
            std::process::exit(1);
        }
    };

    let _guard = logging::init(&config.log_level, &config.log_dir);
    info!("Loaded configuration: model={}", config.model);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting web UI on {}", addr);

    api::serve(config).await?;

    Ok(())
}
