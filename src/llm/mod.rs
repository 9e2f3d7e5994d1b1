//! Gemini model client.
//!
//! Speaks the `generativelanguage.googleapis.com` v1beta `:generateContent`
//! REST endpoint. The `ChatModel` trait is the seam between the agent and
//! the wire so tests can substitute a scripted model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Gemini API key is required. Set GEMINI_API_KEY or provide it in the configuration")]
    MissingApiKey,

    #[error("Gemini API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gemini API returned no text in the response candidates")]
    EmptyResponse,
}

/// A turn role as the Gemini API understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Concatenated text of all parts.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
    generation_config: &'a GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// The seam between the agent wrapper and the remote model.
///
/// A single request carries the full turn history; the reply is the
/// model's text for the latest turn.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, contents: &[Content]) -> Result<String, LlmError>;
}

/// Client for the Gemini REST API.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    generation_config: GenerationConfig,
}

impl GeminiClient {
    /// Create a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::MissingApiKey` if the key is empty. This is the
    /// initialization-failure boundary: no remote call is ever attempted
    /// without a key.
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            generation_config: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
        })
    }

    /// Model identifier this client targets.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn generate(&self, contents: &[Content]) -> Result<String, LlmError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            BASE_URL, self.model, self.api_key
        );

        let body = GenerateContentRequest {
            contents,
            generation_config: &self.generation_config,
        };

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read Gemini error body".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: parse_error_message(&body_text),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        extract_text(parsed)
    }
}

/// Pull a readable message out of a Gemini error body, falling back to the
/// raw body when it is not the documented JSON shape.
fn parse_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorWrapper>(body) {
        Ok(wrapper) => {
            let status = wrapper.error.status.unwrap_or_default();
            let message = wrapper
                .error
                .message
                .unwrap_or_else(|| body.to_string());
            if status.is_empty() {
                message
            } else {
                format!("{}: {}", status, message)
            }
        }
        Err(_) => body.to_string(),
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    let text = response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                Some(candidates.remove(0))
            }
        })
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .filter(|text| !text.is_empty());

    text.ok_or(LlmError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_to_gemini_names() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
    }

    #[test]
    fn generation_config_uses_camel_case_keys() {
        let config = GenerationConfig {
            temperature: 0.7,
            max_output_tokens: 1000,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("maxOutputTokens").is_some());
        assert!(json.get("max_output_tokens").is_none());
    }

    #[test]
    fn request_body_matches_wire_format() {
        let contents = vec![Content::user("hello")];
        let generation_config = GenerationConfig {
            temperature: 0.5,
            max_output_tokens: 100,
        };
        let body = GenerateContentRequest {
            contents: &contents,
            generation_config: &generation_config,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn extract_text_joins_first_candidate_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello"},{"text":", world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Hello, world");
    }

    #[test]
    fn extract_text_rejects_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(LlmError::EmptyResponse)
        ));
    }

    #[test]
    fn error_message_prefers_structured_body() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            parse_error_message(body),
            "RESOURCE_EXHAUSTED: Quota exceeded"
        );
        assert_eq!(parse_error_message("plain text"), "plain text");
    }

    #[test]
    fn client_construction_fails_without_api_key() {
        let config = Config::new("  ".to_string(), "gemini-2.0-flash".to_string());
        assert!(matches!(
            GeminiClient::new(&config),
            Err(LlmError::MissingApiKey)
        ));
    }
}
