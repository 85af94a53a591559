//! Hosted chat-completion client.
//!
//! A thin wrapper over the provider's OpenAI-compatible `chat/completions`
//! endpoint. One request per call, no streaming, no function-calling, no
//! retries: any transport, authentication, or rate-limit fault surfaces to
//! the caller with the provider's raw error text.

use crate::error::{DashResult, DashboardError};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Sampling temperature for SQL generation. Zero keeps the completion
/// deterministic for identical input.
const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for the hosted chat-completion service.
pub struct ChatClient {
    api_key: String,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl ChatClient {
    /// Create a new client.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// The model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one system + user message pair and return the first completion's
    /// message text.
    pub async fn complete(&self, system_prompt: &str, user_prompt: &str) -> DashResult<String> {
        let start = Instant::now();

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .http_client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DashboardError::ai_service(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %error_body, "Chat completion error");
            return Err(DashboardError::ai_service(format!(
                "{}: {}",
                status, error_body
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DashboardError::ai_service(format!("invalid response body: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DashboardError::ai_service("response contained no completions"))?;

        debug!(
            model = %self.model,
            latency_ms = start.elapsed().as_millis() as u64,
            "Chat completion succeeded"
        );

        Ok(content)
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "llama-3.3-70b-versatile",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "usr",
                },
            ],
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "SELECT 1;"}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.choices[0].message.content, "SELECT 1;");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = ChatClient::new("secret-key", "http://localhost/v1", "model");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-key"));
    }
}
