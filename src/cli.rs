//! Interactive command-line loop.
//!
//! Reads one line at a time from stdin, forwards it to the agent, and
//! prints whatever comes back. No flags, no batching.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::agent::Agent;

/// Keywords that end the loop. Checked case-insensitively, before any
/// remote call is issued.
const EXIT_KEYWORDS: &[&str] = &["quit", "exit", "q"];

/// Whether the trimmed input requests an exit.
pub fn is_exit_keyword(input: &str) -> bool {
    EXIT_KEYWORDS.contains(&input.trim().to_lowercase().as_str())
}

/// Run the interactive loop until an exit keyword or end of input.
pub async fn run(mut agent: Agent) -> anyhow::Result<()> {
    println!("\nAI Agent is ready! Ask me anything or type 'quit' to exit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if is_exit_keyword(input) {
            println!("Goodbye!");
            tracing::info!("User requested to exit. Shutting down...");
            break;
        }

        tracing::info!("Processing user input ({} chars)", input.len());
        let response = agent.invoke(input).await;
        println!("Agent: {}", response.output);
    }

    Ok(())
}
