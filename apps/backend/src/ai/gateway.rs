//! Request orchestration: classify, consult the model once, validate, and
//! fall back locally when anything on the model side goes wrong.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use super::adapters::{
    Chat, Checkers, Chess, DotsAndBoxes, Protocol, TriviaGenerator, WordGenerator,
};
use super::classify::{classify, GameRequest};
use super::client::{CompletionClient, UpstreamError};
use super::events::{EventSink, GatewayEvent, Outcome};
use super::fallback::MovePicker;
use super::types::{Answer, AskAiResponse};
use super::validate::AnswerError;
use crate::errors::GatewayError;

/// Why the model's answer was not used. Never surfaced as an HTTP error.
#[derive(Debug, Error)]
pub enum AskFailure {
    #[error("AI service not configured")]
    NotConfigured,
    #[error("AI service error: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("invalid AI answer: {0}")]
    Answer(#[from] AnswerError),
}

pub struct Gateway {
    client: Option<Arc<dyn CompletionClient>>,
    picker: MovePicker,
    events: Arc<dyn EventSink>,
}

impl Gateway {
    /// `client: None` puts every adapter in fallback-only mode.
    pub fn new(
        client: Option<Arc<dyn CompletionClient>>,
        picker: MovePicker,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            client,
            picker,
            events,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Answer one `/api/ask-ai` body.
    ///
    /// `Ok` always carries a structurally valid answer, annotated with `error`
    /// when it came from the fallback policy. `Err` is reserved for caller
    /// errors and chat failures.
    pub async fn ask(&self, body: Value) -> Result<AskAiResponse, GatewayError> {
        match classify(body)? {
            GameRequest::Checkers(req) => self.run::<Checkers>(&req).await,
            GameRequest::Chess(req) => self.run::<Chess>(&req).await,
            GameRequest::DotsAndBoxes(req) => self.run::<DotsAndBoxes>(&req).await,
            GameRequest::WordGenerator(req) => self.run::<WordGenerator>(&req).await,
            GameRequest::TriviaGenerator(req) => self.run::<TriviaGenerator>(&req).await,
            GameRequest::Chat(req) => self.run::<Chat>(&req).await,
        }
    }

    async fn run<P: Protocol>(&self, req: &P::Request) -> Result<AskAiResponse, GatewayError> {
        let started = Instant::now();
        let result = self.answer::<P>(req).await;

        let outcome = match &result {
            Ok(AskAiResponse { error: None, .. }) => Outcome::Model,
            Ok(AskAiResponse {
                error: Some(reason),
                ..
            }) => Outcome::Fallback(reason.clone()),
            Err(e) => Outcome::Failed(e.to_string()),
        };
        self.events.record(GatewayEvent {
            adapter: P::KIND,
            outcome,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        });

        result
    }

    async fn answer<P: Protocol>(&self, req: &P::Request) -> Result<AskAiResponse, GatewayError> {
        P::precheck(req)?;

        let failure = match self.consult::<P>(req).await {
            Ok(answer) => {
                info!(adapter = %P::KIND, "model answer accepted");
                return Ok(AskAiResponse::answered(answer));
            }
            Err(failure) => failure,
        };

        match P::fallback(req, &self.picker) {
            Ok(answer) => {
                warn!(adapter = %P::KIND, reason = %failure, "using fallback answer");
                Ok(AskAiResponse::fell_back(
                    answer,
                    format!("{failure}; used fallback"),
                ))
            }
            Err(e) => {
                error!(adapter = %P::KIND, reason = %failure, "no fallback available");
                Err(e)
            }
        }
    }

    /// Exactly one upstream attempt.
    async fn consult<P: Protocol>(&self, req: &P::Request) -> Result<Answer, AskFailure> {
        let client = self.client.as_ref().ok_or(AskFailure::NotConfigured)?;
        let messages = P::build_prompt(req);
        let raw = client.complete(&messages, P::TUNING).await?;
        Ok(P::parse_and_validate(&raw, req)?)
    }
}
