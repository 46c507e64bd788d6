pub mod mock;
mod openai;
mod types;

pub use openai::{OpenAiClient, DEFAULT_ENDPOINT};
pub use types::{CompletionRequest, Message, Role};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("authentication rejected (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("response contained no content")]
    EmptyResponse,

    #[error("misconfiguration: {0}")]
    Misconfiguration(String),
}

/// A generative text service: role-tagged messages in, text out.
///
/// Implementations make exactly one request per call. Retrying and
/// interpreting failures is left to the caller.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Human-readable client name for logging.
    fn name(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}
