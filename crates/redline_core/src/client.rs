//! Generation clients.
//!
//! [`Generator`] is the one capability the orchestrator depends on. The live
//! implementation speaks an OpenAI-compatible chat-completions API at zero
//! sampling temperature; transient failures are classified at this boundary
//! and retried with backoff. [`ScriptedGenerator`] supports tests with queued
//! outcomes and recorded prompts.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::config::LlmConfig;
use crate::error::GenerateError;
use crate::prompt::PromptPair;
use crate::retry::RetryPolicy;
use crate::schemas::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};

/// How much of an error body to keep in diagnostics
const BODY_LIMIT: usize = 200;

/// Capability to turn a prompt pair into raw generated text
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &PromptPair) -> Result<String, GenerateError>;
}

/// Live client for an OpenAI-compatible chat-completions service
pub struct HttpGenerator {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout_secs: u64,
    retry: RetryPolicy,
}

impl HttpGenerator {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// One attempt against the service, with failure classification
    async fn call_once(&self, prompt: &PromptPair, attempt: u32) -> Result<String, GenerateError> {
        let url = format!("{}/v1/chat/completions", self.endpoint);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: prompt.instruction.clone() },
                ChatMessage { role: "user".to_string(), content: prompt.data.clone() },
            ],
            temperature: 0.0,
            response_format: Some(ResponseFormat { format: "json_object".to_string() }),
        };

        info!(
            attempt,
            model = %self.model,
            instruction_chars = prompt.instruction.len(),
            data_chars = prompt.data.len(),
            "[>] generation call"
        );

        let mut pending = self.http.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            pending = pending.bearer_auth(key);
        }

        let response = pending.send().await.map_err(|e| {
            if e.is_timeout() {
                GenerateError::Timeout { seconds: self.timeout_secs }
            } else {
                GenerateError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), &body));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Protocol(e.to_string()))?;

        let content = chat
            .choices
            .first()
            .map(|choice| choice.message.content.trim())
            .unwrap_or_default();
        if content.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }

        info!(chars = content.len(), "[<] generation response");
        Ok(content.to_string())
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(&self, prompt: &PromptPair) -> Result<String, GenerateError> {
        self.retry.run(|attempt| self.call_once(prompt, attempt)).await
    }
}

/// Map an HTTP status to an explicit error kind
fn classify_status(status: u16, body: &str) -> GenerateError {
    let message = truncate(body);
    match status {
        429 => GenerateError::RateLimited,
        401 | 403 => GenerateError::Auth(message),
        s if s >= 500 => GenerateError::Upstream { status: s, message },
        s => GenerateError::BadRequest(format!("status {}: {}", s, message)),
    }
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= BODY_LIMIT {
        trimmed.to_string()
    } else {
        let mut end = BODY_LIMIT;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &trimmed[..end])
    }
}

/// Scripted generator for tests: queued outcomes, recorded prompts.
///
/// With a single queued outcome left, it keeps returning that outcome; with
/// several, they are consumed in order.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, GenerateError>>>,
    prompts: Mutex<Vec<PromptPair>>,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<String, GenerateError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always return the same text
    pub fn always(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// Always return the same error
    pub fn always_error(error: GenerateError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<PromptPair> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, prompt: &PromptPair) -> Result<String, GenerateError> {
        self.prompts.lock().unwrap().push(prompt.clone());

        let mut responses = self.responses.lock().unwrap();
        if responses.len() == 1 {
            responses[0].clone()
        } else {
            responses
                .pop_front()
                .unwrap_or(Err(GenerateError::EmptyResponse))
        }
    }
}
