use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CompletionClient, CompletionRequest, LlmError, Message};

/// OpenAI chat completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Client for any OpenAI-compatible chat completions endpoint.
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    default_model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, default_model: String) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::Misconfiguration("API key is empty".into()));
        }
        Ok(Self {
            client: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            default_model,
        })
    }

    /// Point the client at a different endpoint (proxy, local server, ...).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        debug!(
            model = %model,
            temperature = request.temperature,
            messages = request.messages.len(),
            "sending chat completion"
        );

        let body = ChatRequest {
            model,
            messages: &request.messages,
            temperature: request.temperature,
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(format!("connection failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(parse_error_with_status(status, resp).await);
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Transport(format!("json decode: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)?;
        debug!(chars = content.len(), "chat completion received");
        Ok(content)
    }
}

async fn parse_error_with_status(status: StatusCode, resp: reqwest::Response) -> LlmError {
    let body = resp.text().await.unwrap_or_default();
    let message = error_message(&body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(message),
        _ => LlmError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

/// OpenAI-style bodies carry `{"error": {"message": ...}}`; some proxies send
/// `{"error": "..."}`. Anything else is returned as-is.
fn error_message(body: &str) -> String {
    let value = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => v,
        Err(_) => return body.to_string(),
    };
    value["error"]["message"]
        .as_str()
        .or_else(|| value["error"].as_str())
        .map(String::from)
        .unwrap_or_else(|| body.to_string())
}
