//! Upstream completion client.
//!
//! One attempt per call, bounded by the configured timeout. Dropping the
//! returned future (client disconnect) cancels the in-flight request.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::types::{Message, Tuning};
use crate::config::upstream::{UpstreamConfig, CONNECT_TIMEOUT};
use crate::logging::security;

const TOP_P: f32 = 0.95;
const FREQUENCY_PENALTY: f32 = 0.0;
const PRESENCE_PENALTY: f32 = 0.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("could not decode upstream response: {0}")]
    Decode(String),
    #[error("upstream returned no completion")]
    EmptyCompletion,
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_decode() {
            UpstreamError::Decode(e.without_url().to_string())
        } else {
            UpstreamError::Transport(e.without_url().to_string())
        }
    }
}

/// Seam between the gateway and the model provider.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the text of the first choice.
    async fn complete(&self, messages: &[Message], tuning: Tuning) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub messages: &'a [Message],
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(messages: &'a [Message], tuning: Tuning) -> Self {
        Self {
            messages,
            max_tokens: tuning.max_tokens,
            temperature: tuning.temperature,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn first_content(response: CompletionResponse) -> Result<String, UpstreamError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(UpstreamError::EmptyCompletion)
}

/// Azure-style chat completions client (`api-key` header auth).
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .build()
            .map_err(UpstreamError::from)?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for UpstreamClient {
    async fn complete(&self, messages: &[Message], tuning: Tuning) -> Result<String, UpstreamError> {
        let body = CompletionRequest::new(messages, tuning);

        let response = self
            .http
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            security::upstream_auth_rejected(status.as_u16());
        }
        if !status.is_success() {
            debug!(status = status.as_u16(), "upstream returned non-success status");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let parsed: CompletionResponse = response.json().await?;
        first_content(parsed)
    }
}
