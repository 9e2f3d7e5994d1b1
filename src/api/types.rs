//! API request and response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to submit a chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Session to append to; a new session is allocated when absent
    pub session_id: Option<Uuid>,

    /// The user's message, forwarded to the agent verbatim
    pub message: String,
}

/// Response to a chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    /// Session the exchange was recorded under
    pub session_id: Uuid,

    /// The agent's reply (possibly an error description)
    pub output: String,

    /// Whether the input was routed through the multi-step path
    pub complex: bool,

    /// Cosmetic workflow-step labels for the complex path (empty otherwise)
    pub workflow_steps: Vec<String>,
}

/// Request to clear a session.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetRequest {
    pub session_id: Uuid,
}

/// One displayed chat message.
#[derive(Debug, Clone, Serialize)]
pub struct UiMessage {
    /// Display role ("You" or "AI Agent")
    pub role: String,

    /// Message text
    pub content: String,

    /// Whether this message reports an error
    pub is_error: bool,

    /// Whether this message is a multi-step task result
    pub is_task: bool,
}

/// One completed task in the session's history.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    /// Original task description
    pub task: String,

    /// Workflow-step labels shown for it
    pub steps: Vec<String>,

    /// Wall-clock time of submission (HH:MM:SS)
    pub timestamp: String,
}

/// Snapshot of one session's display state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub messages: Vec<UiMessage>,
    pub task_history: Vec<TaskRecord>,
    pub workflow_steps: Vec<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
