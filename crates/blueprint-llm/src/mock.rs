use std::sync::Mutex;

use async_trait::async_trait;

use crate::{CompletionClient, CompletionRequest, LlmError};

type Responder = dyn Fn(&CompletionRequest, usize) -> Result<String, LlmError> + Send + Sync;

/// A client for tests that answers from a closure and records every request.
///
/// The closure receives the request and its zero-based call index.
pub struct ScriptedClient {
    responder: Box<Responder>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&CompletionRequest, usize) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reply with `responses` in order; calls past the end get `EmptyResponse`.
    pub fn replying(responses: Vec<&str>) -> Self {
        let responses: Vec<String> = responses.into_iter().map(String::from).collect();
        Self::new(move |_, i| responses.get(i).cloned().ok_or(LlmError::EmptyResponse))
    }

    /// Every request received so far, in call order.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CompletionRequest>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let index = {
            let mut calls = self.lock();
            calls.push(request.clone());
            calls.len() - 1
        };
        (self.responder)(request, index)
    }
}
