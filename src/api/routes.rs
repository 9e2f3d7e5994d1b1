//! HTTP server setup: shared state, router, and serve loop.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::agent::{Agent, AgentInfo};
use crate::config::Config;
use crate::llm::{ChatModel, GeminiClient, LlmError};

use super::chat::{self, Session};
use super::types::HealthResponse;
use super::ui;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub(super) model: Arc<dyn ChatModel>,
    pub(super) info: AgentInfo,
    pub(super) sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
}

impl AppState {
    /// Build state backed by the real Gemini client.
    ///
    /// # Errors
    ///
    /// Fails if the API key is missing, before the server starts.
    pub fn new(config: Config) -> Result<Arc<Self>, LlmError> {
        let model = Arc::new(GeminiClient::new(&config)?);
        Ok(Self::with_model(config, model))
    }

    /// Build state over an arbitrary model implementation.
    pub fn with_model(config: Config, model: Arc<dyn ChatModel>) -> Arc<Self> {
        let info = Agent::with_model(config.clone(), Arc::clone(&model)).info();
        Arc::new(Self {
            config,
            model,
            info,
            sessions: RwLock::new(HashMap::new()),
        })
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

/// Uniform JSON error body.
pub(super) fn error_response(status: StatusCode, message: &str) -> Response {
    let body = ErrorResponse {
        error: ErrorBody {
            message: message.to_string(),
        },
    };
    (status, Json(body)).into_response()
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route("/api/chat", post(chat::chat))
        .route("/api/reset", post(chat::reset))
        .route("/api/session/:id", get(chat::session))
        .route("/api/agent", get(chat::agent_info))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Bind and serve until the process exits.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web UI listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;

    Ok(())
}
