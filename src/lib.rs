//! # Gemini Agent
//!
//! A thin conversational wrapper around the Google Gemini API with two
//! frontends: an interactive CLI loop and a browser chat UI.
//!
//! This library provides:
//! - A model client for the Gemini `:generateContent` REST endpoint
//! - An agent wrapper holding one persistent chat session, with a
//!   single-step `invoke` and a fixed three-step task path
//! - An HTTP API serving the chat UI
//!
//! ## Example
//!
//! ```rust,ignore
//! use gemini_agent::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let mut agent = Agent::new(config)?;
//! let response = agent.invoke("What is Rust?").await;
//! println!("{}", response.output);
//! ```

pub mod agent;
pub mod api;
pub mod cli;
pub mod config;
pub mod llm;
pub mod logging;

pub use config::Config;
