//! Chat endpoint handlers and per-session state.
//!
//! Each web session owns its own agent (and therefore its own chat
//! handle). A request locks its session for the duration of the remote
//! call, so interactions within one session are strictly sequential.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::agent::Agent;

use super::routes::{error_response, AppState};
use super::types::{ChatRequest, ChatResponse, ResetRequest, SessionSnapshot, TaskRecord, UiMessage};

/// Substrings that route an input through the multi-step task path.
/// Purely cosmetic routing; the model decides what it actually does.
const COMPLEX_KEYWORDS: &[&str] = &[
    "search",
    "summarize",
    "extract",
    "analyze",
    "research",
    "find",
    "compare",
];

/// Whether an input counts as a "complex" multi-step task.
pub(super) fn is_complex_task(input: &str) -> bool {
    let lower = input.to_lowercase();
    COMPLEX_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Static workflow-step labels displayed for a task. Not derived from the
/// model's actual behavior.
pub(super) fn workflow_steps_for(task: &str) -> Vec<String> {
    vec![
        format!("Task analysis: {}", task),
        "Information gathering".to_string(),
        "Data processing".to_string(),
        "Response generation".to_string(),
    ]
}

/// Server-side state of one browser session.
pub(super) struct Session {
    agent: Agent,
    messages: Vec<UiMessage>,
    task_history: Vec<TaskRecord>,
    workflow_steps: Vec<String>,
}

impl Session {
    fn new(agent: Agent) -> Self {
        Self {
            agent,
            messages: Vec::new(),
            task_history: Vec::new(),
            workflow_steps: Vec::new(),
        }
    }

    fn snapshot(&self, session_id: Uuid) -> SessionSnapshot {
        SessionSnapshot {
            session_id,
            messages: self.messages.clone(),
            task_history: self.task_history.clone(),
            workflow_steps: self.workflow_steps.clone(),
        }
    }
}

/// Look up a session, allocating a fresh one when `session_id` is absent
/// or unknown.
async fn session_for(state: &AppState, session_id: Option<Uuid>) -> (Uuid, Arc<Mutex<Session>>) {
    if let Some(id) = session_id {
        if let Some(session) = state.sessions.read().await.get(&id) {
            return (id, Arc::clone(session));
        }
    }

    let id = session_id.unwrap_or_else(Uuid::new_v4);
    let agent = Agent::with_model(state.config.clone(), Arc::clone(&state.model));
    let session = Arc::new(Mutex::new(Session::new(agent)));
    state
        .sessions
        .write()
        .await
        .insert(id, Arc::clone(&session));
    tracing::debug!("Allocated web session {}", id);
    (id, session)
}

/// Process one submitted message against its session.
pub(super) async fn handle_chat(state: &AppState, request: ChatRequest) -> ChatResponse {
    let (session_id, session) = session_for(state, request.session_id).await;
    let mut session = session.lock().await;

    session.messages.push(UiMessage {
        role: "You".to_string(),
        content: request.message.clone(),
        is_error: false,
        is_task: false,
    });

    let complex = is_complex_task(&request.message);
    let (output, workflow_steps) = if complex {
        let response = session.agent.execute_multi_step_task(&request.message).await;
        let steps = workflow_steps_for(&request.message);
        session.workflow_steps = steps.clone();
        session.task_history.push(TaskRecord {
            task: request.message.clone(),
            steps: steps.clone(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        });
        (response.output, steps)
    } else {
        let response = session.agent.invoke(&request.message).await;
        (response.output, Vec::new())
    };

    session.messages.push(UiMessage {
        role: "AI Agent".to_string(),
        content: output.clone(),
        is_error: false,
        is_task: complex,
    });

    ChatResponse {
        session_id,
        output,
        complex,
        workflow_steps,
    }
}

/// Clear one session wholesale: messages, task history, and chat handle.
pub(super) async fn handle_reset(state: &AppState, session_id: Uuid) -> Option<SessionSnapshot> {
    let session = {
        let sessions = state.sessions.read().await;
        sessions.get(&session_id).map(Arc::clone)
    }?;

    let mut session = session.lock().await;
    session.messages.clear();
    session.task_history.clear();
    session.workflow_steps.clear();
    session.agent.reset();
    Some(session.snapshot(session_id))
}

pub(super) async fn handle_snapshot(state: &AppState, session_id: Uuid) -> Option<SessionSnapshot> {
    let session = {
        let sessions = state.sessions.read().await;
        sessions.get(&session_id).map(Arc::clone)
    }?;

    let session = session.lock().await;
    Some(session.snapshot(session_id))
}

// ── axum handlers ────────────────────────────────────────────────────────

/// POST /api/chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    if request.message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "message must not be empty");
    }

    Json(handle_chat(&state, request).await).into_response()
}

/// POST /api/reset
pub async fn reset(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResetRequest>,
) -> Response {
    match handle_reset(&state, request.session_id).await {
        Some(snapshot) => Json(snapshot).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "unknown session"),
    }
}

/// GET /api/session/:id
pub async fn session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Response {
    match handle_snapshot(&state, session_id).await {
        Some(snapshot) => Json(snapshot).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "unknown session"),
    }
}

/// GET /api/agent
pub async fn agent_info(State(state): State<Arc<AppState>>) -> Response {
    Json(state.info.clone()).into_response()
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use async_trait::async_trait;

    use crate::config::Config;
    use crate::llm::{ChatModel, Content, LlmError};

    use super::*;

    #[test]
    fn complex_detection_is_substring_and_case_insensitive() {
        assert!(is_complex_task("Search for rust news"));
        assert!(is_complex_task("please SUMMARIZE this"));
        assert!(is_complex_task("researching frameworks"));
        assert!(!is_complex_task("hello there"));
        assert!(!is_complex_task("what time is it?"));
    }

    #[test]
    fn workflow_steps_lead_with_the_task() {
        let steps = workflow_steps_for("compare databases");
        assert_eq!(steps.len(), 4);
        assert!(steps[0].contains("compare databases"));
        assert_eq!(steps[3], "Response generation");
    }

    struct ScriptedModel {
        replies: std::sync::Mutex<VecDeque<String>>,
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn generate(&self, _contents: &[Content]) -> Result<String, LlmError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(LlmError::EmptyResponse)
        }
    }

    fn test_state(replies: Vec<&str>) -> Arc<AppState> {
        let model = Arc::new(ScriptedModel {
            replies: std::sync::Mutex::new(replies.into_iter().map(String::from).collect()),
        });
        let config = Config::new("test-key".to_string(), "gemini-2.0-flash".to_string());
        AppState::with_model(config, model)
    }

    #[tokio::test]
    async fn simple_message_takes_the_single_step_path() {
        let state = test_state(vec!["hello back"]);

        let response = handle_chat(
            &state,
            ChatRequest {
                session_id: None,
                message: "hello".to_string(),
            },
        )
        .await;

        assert_eq!(response.output, "hello back");
        assert!(!response.complex);
        assert!(response.workflow_steps.is_empty());

        let snapshot = handle_snapshot(&state, response.session_id).await.unwrap();
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[0].role, "You");
        assert!(snapshot.task_history.is_empty());
    }

    #[tokio::test]
    async fn complex_message_records_task_history_and_steps() {
        let state = test_state(vec!["plan", "sources", "findings"]);

        let response = handle_chat(
            &state,
            ChatRequest {
                session_id: None,
                message: "summarize the latest AI developments".to_string(),
            },
        )
        .await;

        assert!(response.complex);
        assert_eq!(response.workflow_steps.len(), 4);
        assert!(response.output.contains("plan"));
        assert!(response.output.contains("findings"));

        let snapshot = handle_snapshot(&state, response.session_id).await.unwrap();
        assert_eq!(snapshot.task_history.len(), 1);
        assert!(snapshot.messages[1].is_task);
    }

    #[tokio::test]
    async fn sessions_are_isolated_and_reused_by_id() {
        let state = test_state(vec!["first", "second", "other"]);

        let first = handle_chat(
            &state,
            ChatRequest {
                session_id: None,
                message: "hello".to_string(),
            },
        )
        .await;

        let again = handle_chat(
            &state,
            ChatRequest {
                session_id: Some(first.session_id),
                message: "more".to_string(),
            },
        )
        .await;
        assert_eq!(again.session_id, first.session_id);

        let other = handle_chat(
            &state,
            ChatRequest {
                session_id: None,
                message: "hi".to_string(),
            },
        )
        .await;
        assert_ne!(other.session_id, first.session_id);

        let snapshot = handle_snapshot(&state, first.session_id).await.unwrap();
        assert_eq!(snapshot.messages.len(), 4);
        let other_snapshot = handle_snapshot(&state, other.session_id).await.unwrap();
        assert_eq!(other_snapshot.messages.len(), 2);
    }

    #[tokio::test]
    async fn reset_clears_everything_for_one_session() {
        let state = test_state(vec!["plan", "sources", "findings"]);

        let response = handle_chat(
            &state,
            ChatRequest {
                session_id: None,
                message: "analyze this dataset".to_string(),
            },
        )
        .await;

        let cleared = handle_reset(&state, response.session_id).await.unwrap();
        assert!(cleared.messages.is_empty());
        assert!(cleared.task_history.is_empty());
        assert!(cleared.workflow_steps.is_empty());
    }

    #[tokio::test]
    async fn reset_of_unknown_session_is_not_found() {
        let state = test_state(vec![]);
        assert!(handle_reset(&state, Uuid::new_v4()).await.is_none());
    }
}
