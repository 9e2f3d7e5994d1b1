//! Core agent wrapper implementation.

use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::llm::{ChatModel, Content, GeminiClient, LlmError};

use super::prompt;

/// Response object returned by every agent entry point.
///
/// `output` is either the model's reply or a human-readable error
/// description; the agent never propagates errors past its boundary.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeResponse {
    pub output: String,
}

/// Static configuration details, for status displays.
#[derive(Debug, Clone, Serialize)]
pub struct AgentInfo {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub api_key_configured: bool,
    pub agent_type: &'static str,
    pub provider: &'static str,
}

/// The stateful conversation held with the remote service.
///
/// Append-only during a run; the full history is sent with every request
/// so the service keeps context across turns.
struct ChatSession {
    history: Vec<Content>,
}

impl ChatSession {
    fn new() -> Self {
        Self {
            history: Vec::new(),
        }
    }

    /// Send one message over the session and record both turns.
    ///
    /// On failure the pending user turn is dropped so the history only
    /// ever contains completed exchanges.
    async fn send(&mut self, model: &dyn ChatModel, text: String) -> Result<String, LlmError> {
        self.history.push(Content::user(text));
        match model.generate(&self.history).await {
            Ok(reply) => {
                self.history.push(Content::model(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }

    fn turn_count(&self) -> usize {
        self.history.len()
    }
}

/// The conversational agent wrapper.
///
/// Owns its chat session exclusively; configuration is passed in at
/// construction rather than read from globals.
pub struct Agent {
    config: Config,
    model: Arc<dyn ChatModel>,
    session: Option<ChatSession>,
}

impl Agent {
    /// Create an agent backed by the real Gemini client.
    ///
    /// # Errors
    ///
    /// Fails if the API key is missing, before any remote call is made.
    pub fn new(config: Config) -> Result<Self, LlmError> {
        let model = Arc::new(GeminiClient::new(&config)?);
        Ok(Self::with_model(config, model))
    }

    /// Create an agent over an arbitrary model implementation.
    pub fn with_model(config: Config, model: Arc<dyn ChatModel>) -> Self {
        Self {
            config,
            model,
            session: None,
        }
    }

    /// Lazily open the chat session. Idempotent: subsequent calls return
    /// the existing handle.
    fn session_mut(&mut self) -> &mut ChatSession {
        self.session.get_or_insert_with(|| {
            tracing::debug!("Opening new chat session");
            ChatSession::new()
        })
    }

    /// Process one user input and return the model's reply.
    #[tracing::instrument(skip_all)]
    pub async fn invoke(&mut self, input: &str) -> InvokeResponse {
        let model = Arc::clone(&self.model);
        let prompt = prompt::enhanced_prompt(input);

        match self.session_mut().send(model.as_ref(), prompt).await {
            Ok(output) => InvokeResponse { output },
            Err(e) => {
                tracing::error!("Error in agent invoke: {}", e);
                InvokeResponse {
                    output: format!("Sorry, I encountered an error: {}", e),
                }
            }
        }
    }

    /// Execute the fixed three-step task workflow.
    ///
    /// A failure in any step aborts the remaining steps; no earlier step
    /// output appears in the result.
    #[tracing::instrument(skip_all)]
    pub async fn execute_multi_step_task(&mut self, task: &str) -> InvokeResponse {
        match self.run_steps(task).await {
            Ok(output) => InvokeResponse { output },
            Err(e) => {
                tracing::error!("Error in multi-step task execution: {}", e);
                InvokeResponse {
                    output: format!("Error executing multi-step task: {}", e),
                }
            }
        }
    }

    async fn run_steps(&mut self, task: &str) -> Result<String, LlmError> {
        let model = Arc::clone(&self.model);
        let session = self.session_mut();

        let analysis = session
            .send(model.as_ref(), prompt::analysis_prompt(task))
            .await?;
        let gathering = session
            .send(model.as_ref(), prompt::gathering_prompt(task))
            .await?;
        let synthesis = session
            .send(model.as_ref(), prompt::synthesis_prompt(task))
            .await?;

        Ok(prompt::task_report(task, &analysis, &gathering, &synthesis))
    }

    /// Discard the conversation wholesale. The next call opens a fresh
    /// session.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Number of recorded turns in the current session (0 if none open).
    pub fn session_turns(&self) -> usize {
        self.session.as_ref().map_or(0, ChatSession::turn_count)
    }

    /// Static configuration details for status displays.
    pub fn info(&self) -> AgentInfo {
        AgentInfo {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_output_tokens,
            api_key_configured: !self.config.api_key.trim().is_empty(),
            agent_type: "GeminiAgent",
            provider: "Google Gemini",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Scripted model: pops one canned reply per call and records the
    /// request histories it was given.
    struct ScriptedModel {
        replies: Mutex<VecDeque<Result<String, String>>>,
        requests: Mutex<Vec<Vec<Content>>>,
    }

    impl ScriptedModel {
        fn new(replies: Vec<Result<String, String>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_histories(&self) -> Vec<Vec<Content>> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn generate(&self, contents: &[Content]) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(contents.to_vec());
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(message)) => Err(LlmError::Api {
                    status: 500,
                    message,
                }),
                None => Err(LlmError::EmptyResponse),
            }
        }
    }

    fn test_agent(replies: Vec<Result<String, String>>) -> (Agent, Arc<ScriptedModel>) {
        let model = ScriptedModel::new(replies);
        let config = Config::new("test-key".to_string(), "gemini-2.0-flash".to_string());
        let agent = Agent::with_model(config, Arc::clone(&model) as Arc<dyn ChatModel>);
        (agent, model)
    }

    #[test]
    fn construction_fails_without_api_key() {
        let config = Config::new(String::new(), "gemini-2.0-flash".to_string());
        assert!(Agent::new(config).is_err());
    }

    #[tokio::test]
    async fn invoke_wraps_input_in_preamble_and_returns_reply() {
        let (mut agent, model) = test_agent(vec![Ok("hi there".to_string())]);

        let response = agent.invoke("hello agent").await;
        assert_eq!(response.output, "hi there");

        let histories = model.request_histories();
        assert_eq!(histories.len(), 1);
        assert_eq!(histories[0].len(), 1);
        let sent = histories[0][0].text();
        assert!(sent.contains("\"hello agent\""));
        assert!(sent.contains("autonomous AI agent"));
    }

    #[tokio::test]
    async fn invoke_converts_call_failure_to_error_string() {
        let (mut agent, _model) = test_agent(vec![Err("quota exceeded".to_string())]);

        let response = agent.invoke("hello").await;
        assert!(response.output.starts_with("Sorry, I encountered an error"));
        assert!(response.output.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn repeated_invokes_reuse_the_same_session() {
        let (mut agent, model) = test_agent(vec![
            Ok("first".to_string()),
            Ok("second".to_string()),
        ]);

        agent.invoke("one").await;
        assert_eq!(agent.session_turns(), 2);

        agent.invoke("two").await;
        assert_eq!(agent.session_turns(), 4);

        // The second request carried the whole history, not a fresh one.
        let histories = model.request_histories();
        assert_eq!(histories[1].len(), 3);
    }

    #[tokio::test]
    async fn multi_step_combines_task_and_steps_in_order() {
        let (mut agent, _model) = test_agent(vec![
            Ok("ANALYSIS-OUT".to_string()),
            Ok("GATHERING-OUT".to_string()),
            Ok("SYNTHESIS-OUT".to_string()),
        ]);

        let response = agent.execute_multi_step_task("compare rust web frameworks").await;
        let output = &response.output;

        let task = output.find("compare rust web frameworks").unwrap();
        let a = output.find("ANALYSIS-OUT").unwrap();
        let b = output.find("GATHERING-OUT").unwrap();
        let c = output.find("SYNTHESIS-OUT").unwrap();
        assert!(task < a && a < b && b < c);

        // All three exchanges landed on one session.
        assert_eq!(agent.session_turns(), 6);
    }

    #[tokio::test]
    async fn multi_step_failure_in_second_step_drops_first_result() {
        let (mut agent, model) = test_agent(vec![
            Ok("STEP-ONE-RESULT".to_string()),
            Err("connection reset".to_string()),
        ]);

        let response = agent.execute_multi_step_task("some task").await;
        assert!(response.output.starts_with("Error executing multi-step task"));
        assert!(!response.output.contains("STEP-ONE-RESULT"));

        // The third step was never attempted.
        assert_eq!(model.request_histories().len(), 2);
    }

    #[tokio::test]
    async fn reset_discards_the_session() {
        let (mut agent, _model) = test_agent(vec![Ok("reply".to_string())]);

        agent.invoke("hello").await;
        assert_eq!(agent.session_turns(), 2);

        agent.reset();
        assert_eq!(agent.session_turns(), 0);
    }

    #[test]
    fn info_reports_static_configuration() {
        let (agent, _model) = test_agent(vec![]);
        let info = agent.info();
        assert_eq!(info.model, "gemini-2.0-flash");
        assert!(info.api_key_configured);
        assert_eq!(info.provider, "Google Gemini");
    }
}
