//! HTTP API and browser chat UI.

mod chat;
mod routes;
pub mod types;
mod ui;

pub use routes::{serve, AppState};
