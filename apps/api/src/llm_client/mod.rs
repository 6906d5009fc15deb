/// LLM client: the single point of entry for all completion calls.
///
/// No other module may call the completion API directly. Callers depend on the
/// `CompletionModel` trait so tests can substitute a canned model.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM response contained no choices")]
    NoChoices,
}

/// A single chat completion: one system message, one user message.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Anything that can turn a prompt into raw reply text.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if the model produced any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.llm_timeout_secs))
                .build()?,
            api_url: config.llm_api_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.llm_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a single call to the completion API, returning the full response object.
    pub async fn call(&self, request: CompletionRequest<'_>) -> Result<ChatResponse, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat)
    }
}

#[async_trait]
impl CompletionModel for LlmClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        if response.choices.is_empty() {
            return Err(LlmError::NoChoices);
        }
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let body = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            max_tokens: 500,
            temperature: 0.3,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["max_tokens"], 500);
    }

    #[test]
    fn test_response_text_reads_first_choice() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "{\"a\": 1}"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("{\"a\": 1}"));
        assert_eq!(response.usage.unwrap().completion_tokens, 4);
    }

    #[test]
    fn test_response_without_content_has_no_text() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(response.text().is_none());
    }

    /// Serves a fake chat-completions API and returns its base URL.
    async fn serve_fake_api() -> String {
        use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
        use serde_json::{json, Value};

        let app = Router::new()
            .route(
                "/ok",
                post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    let reply = format!(
                        "{auth}|{}|{}|{}",
                        body["model"], body["max_tokens"], body["messages"][1]["content"]
                    );
                    Json(json!({
                        "choices": [{"message": {"role": "assistant", "content": reply}}],
                        "usage": {"prompt_tokens": 20, "completion_tokens": 5}
                    }))
                }),
            )
            .route(
                "/unauthorized",
                post(|| async {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}})),
                    )
                }),
            )
            .route(
                "/null-content",
                post(|| async {
                    Json(json!({"choices": [{"message": {"role": "assistant", "content": null}}]}))
                }),
            )
            .route(
                "/no-choices",
                post(|| async { Json(json!({"choices": []})) }),
            )
            .route(
                "/slow",
                post(|| async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    Json(json!({"choices": [{"message": {"content": "late"}}]}))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(url: String) -> LlmClient {
        LlmClient::new(&Config {
            openai_api_key: "test-key".to_string(),
            llm_api_url: url,
            llm_model: "gpt-3.5-turbo".to_string(),
            llm_timeout_secs: 1,
            cors_allowed_origins: Vec::new(),
            port: 0,
            rust_log: "info".to_string(),
        })
        .unwrap()
    }

    const REQUEST: CompletionRequest<'static> = CompletionRequest {
        system: "sys",
        prompt: "Bike lanes on Main Street",
        max_tokens: 500,
        temperature: 0.3,
    };

    #[tokio::test]
    async fn test_complete_returns_first_choice_text() {
        let base = serve_fake_api().await;
        let text = client_for(format!("{base}/ok")).complete(REQUEST).await.unwrap();
        assert_eq!(
            text,
            r#"Bearer test-key|"gpt-3.5-turbo"|500|"Bike lanes on Main Street""#
        );
    }

    #[tokio::test]
    async fn test_error_status_carries_provider_message() {
        let base = serve_fake_api().await;
        let err = client_for(format!("{base}/unauthorized"))
            .complete(REQUEST)
            .await
            .unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_null_content_is_empty_content() {
        let base = serve_fake_api().await;
        let err = client_for(format!("{base}/null-content"))
            .complete(REQUEST)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent), "got {err:?}");
    }

    #[tokio::test]
    async fn test_empty_choices_is_not_empty_content() {
        let base = serve_fake_api().await;
        let err = client_for(format!("{base}/no-choices"))
            .complete(REQUEST)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NoChoices), "got {err:?}");
    }

    #[tokio::test]
    async fn test_configured_timeout_applies() {
        let base = serve_fake_api().await;
        let err = client_for(format!("{base}/slow"))
            .complete(REQUEST)
            .await
            .unwrap_err();
        match err {
            LlmError::Http(e) => assert!(e.is_timeout(), "got {e}"),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
