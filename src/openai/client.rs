//! Chat-completions HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::OpenAiError;

/// Model used for code generation unless overridden with --model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default API endpoint; overridable for tests and compatible servers.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Generation temperature used for every request.
const TEMPERATURE: f32 = 0.4;

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Text-generation seam. The attempt loop talks to this trait so tests can
/// script responses without a network.
#[async_trait]
pub trait CodeModel: Send + Sync {
    /// Generate a completion for a system + user message pair.
    async fn complete(&self, system: &str, user: &str) -> Result<String, OpenAiError>;
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// OpenAI chat-completions client.
pub struct OpenAiClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(
        model: String,
        api_key: String,
        base_url: Option<String>,
    ) -> Result<Self, OpenAiError> {
        let client = Client::builder()
            .no_proxy()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(OpenAiError::RequestFailed)?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            model,
            api_key,
            base_url,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CodeModel for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, OpenAiError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(OpenAiError::RequestFailed)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(OpenAiError::AuthFailed);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OpenAiError::BadStatus { status, body });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| OpenAiError::InvalidResponse(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(OpenAiError::EmptyResponse)?;

        Ok(choice.message.content.unwrap_or_default())
    }
}
