//! Chat completion client for OpenAI-compatible endpoints (Groq by default).

pub mod types;

use crate::config::Config;
use crate::error::{MdtoolError, Result};
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use types::{ChatMessage, ChatRequest, ChatResponse};

/// Anything that can turn a prompt into generated text
#[async_trait]
pub trait Completion: Send + Sync {
    /// Sends `prompt` and returns the generated text
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Single-shot client for a chat completions endpoint
pub struct CompletionClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl CompletionClient {
    /// Creates a client from the completion settings.
    ///
    /// The API key is not checked here; [`Completion::complete`] rejects an
    /// empty key before any network activity.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.completion_timeout())
            .build()
            .map_err(|e| MdtoolError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.groq_api_key.clone(),
            endpoint: config.completion.endpoint.clone(),
            model: config.default_model.clone(),
            temperature: config.completion.temperature,
            max_tokens: config.completion.max_tokens,
        })
    }

    /// Request body for a single user message
    pub fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl Completion for CompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(MdtoolError::Config("GROQ_API_KEY is not set".into()));
        }

        info!("Sending request to completion API (model {})", self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.trim())
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| MdtoolError::Network(format!("failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MdtoolError::Network(format!("failed to read response body: {}", e)))?;
        info!("Completion API response status: {}", status.as_u16());

        if !status.is_success() {
            return Err(MdtoolError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let content = extract_content(status.as_u16(), &body)?;
        info!("Successfully generated README content");
        Ok(content)
    }
}

/// Pulls the first choice's text out of a completion response body
pub fn extract_content(status: u16, body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        if let Some(message) = error.message.filter(|m| !m.is_empty()) {
            return Err(MdtoolError::Api {
                status,
                message: match error.kind {
                    Some(kind) => format!("{} (type: {})", message, kind),
                    None => message,
                },
            });
        }
    }

    let choice = response.choices.unwrap_or_default().into_iter().next().ok_or_else(|| {
        MdtoolError::EmptyResponse(format!("API returned no choices in response: {}", body))
    })?;

    match choice.message.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(MdtoolError::EmptyResponse(format!("API returned empty content: {}", body))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    fn config_for(server: &ServerGuard, api_key: &str) -> Config {
        let mut config = Config {
            groq_api_key: api_key.to_string(),
            ..Config::default()
        };
        config.completion.endpoint = format!("{}/openai/v1/chat/completions", server.url());
        config
    }

    #[test]
    fn test_request_shape() {
        let client = CompletionClient::new(&Config::default()).unwrap();
        let body = serde_json::to_value(client.build_request("Write a README")).unwrap();
        assert_eq!(body, json!({
            "messages": [{"role": "user", "content": "Write a README"}],
            "model": "llama-3.3-70b-versatile",
            "temperature": 0.7,
            "max_tokens": 2000
        }));
    }

    #[test]
    fn test_no_choices_is_empty_response() {
        let result = extract_content(200, r#"{"choices": []}"#);
        assert!(matches!(result, Err(MdtoolError::EmptyResponse(_))));
    }

    #[test]
    fn test_null_choices_is_empty_response() {
        for body in [r#"{"choices": null}"#, r#"{}"#] {
            let result = extract_content(200, body);
            assert!(matches!(result, Err(MdtoolError::EmptyResponse(_))), "{}", body);
        }
    }

    #[test]
    fn test_null_error_message_is_ignored() {
        let result = extract_content(200, r#"{"choices": [], "error": {"message": null}}"#);
        assert!(matches!(result, Err(MdtoolError::EmptyResponse(_))));

        let body = r##"{"choices": [{"message": {"content": "# Hello"}}], "error": null}"##;
        assert_eq!(extract_content(200, body).unwrap(), "# Hello");
    }

    #[test]
    fn test_blank_content_is_empty_response() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "  "}}]}"#;
        let result = extract_content(200, body);
        assert!(matches!(result, Err(MdtoolError::EmptyResponse(_))));
    }

    #[test]
    fn test_error_field_is_api_error() {
        let body = r#"{"choices": [],
            "error": {"message": "model_decommissioned", "type": "invalid_request_error"}}"#;
        match extract_content(200, body) {
            Err(MdtoolError::Api { status, message }) => {
                assert_eq!(status, 200);
                assert!(message.contains("model_decommissioned"));
                assert!(message.contains("invalid_request_error"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_error_message_is_ignored() {
        let body =
            r##"{"choices": [{"message": {"content": "# Hello"}}], "error": {"message": ""}}"##;
        assert_eq!(extract_content(200, body).unwrap(), "# Hello");
    }

    #[tokio::test]
    async fn test_empty_api_key_fails_before_network() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let client = CompletionClient::new(&config_for(&server, "")).unwrap();
        let result = client.complete("prompt").await;
        assert!(matches!(result, Err(MdtoolError::Config(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .match_header("authorization", "Bearer gsk_test")
            .match_body(Matcher::PartialJson(json!({
                "messages": [{"role": "user", "content": "prompt"}],
                "max_tokens": 2000
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r##"{"choices": [{"message": {"role": "assistant", "content": "# Hello-World\n"}}]}"##,
            )
            .create_async()
            .await;

        let client = CompletionClient::new(&config_for(&server, "gsk_test")).unwrap();
        assert_eq!(client.complete("prompt").await.unwrap(), "# Hello-World\n");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Invalid API Key"}}"#)
            .create_async()
            .await;

        let client = CompletionClient::new(&config_for(&server, "gsk_bad")).unwrap();
        match client.complete("prompt").await {
            Err(MdtoolError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert!(message.contains("Invalid API Key"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let mut config = Config { groq_api_key: "gsk_test".into(), ..Config::default() };
        config.completion.endpoint = "http://127.0.0.1:1/v1/chat/completions".into();

        let client = CompletionClient::new(&config).unwrap();
        assert!(matches!(client.complete("prompt").await, Err(MdtoolError::Network(_))));
    }
}
