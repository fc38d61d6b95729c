//! Generators that never touch the network.

use crate::{GenerationRequest, TextGenerator};
use async_trait::async_trait;
use std::collections::VecDeque;
use surco_core::LlmError;
use tokio::sync::Mutex;

/// Always returns the same text.
#[derive(Debug, Clone)]
pub struct StaticGenerator {
    response: String,
}

impl StaticGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, LlmError> {
        Ok(self.response.clone())
    }

    fn provider(&self) -> &str {
        "static"
    }
}

/// Always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingGenerator {
    error: LlmError,
}

impl FailingGenerator {
    pub fn new(error: LlmError) -> Self {
        Self { error }
    }

    /// Fails as an unreachable provider.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(LlmError::Unavailable {
            provider: "failing".to_string(),
            reason: reason.into(),
        })
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, LlmError> {
        Err(self.error.clone())
    }

    fn provider(&self) -> &str {
        "failing"
    }
}

/// Replays queued outcomes in order and records every request it sees.
///
/// Once the script is exhausted every call returns `LlmError::EmptyResponse`.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn push_response(&self, response: impl Into<String>) {
        self.script.lock().await.push_back(Ok(response.into()));
    }

    pub async fn push_error(&self, error: LlmError) {
        self.script.lock().await.push_back(Err(error));
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn last_prompt(&self) -> Option<String> {
        self.requests.lock().await.last().map(|r| r.prompt.clone())
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let call = {
            let mut requests = self.requests.lock().await;
            requests.push(request.clone());
            requests.len()
        };
        match self.script.lock().await.pop_front() {
            Some(outcome) => outcome,
            None => {
                tracing::warn!(call, model = %request.model, "Scripted generator exhausted");
                Err(LlmError::EmptyResponse {
                    provider: "scripted".to_string(),
                })
            }
        }
    }

    fn provider(&self) -> &str {
        "scripted"
    }
}
