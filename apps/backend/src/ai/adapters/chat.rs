use serde::Deserialize;

use super::{AdapterKind, Protocol};
use crate::ai::fallback::MovePicker;
use crate::ai::types::{Answer, Message, Tuning};
use crate::ai::validate::AnswerError;
use crate::errors::GatewayError;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub history: Vec<Message>,
}

/// Freeform conversation. The history is forwarded as-is and the reply is
/// returned as text; there is no structural answer to recover locally.
pub struct Chat;

impl Protocol for Chat {
    type Request = ChatRequest;

    const KIND: AdapterKind = AdapterKind::Chat;
    const TUNING: Tuning = Tuning::creative(300);

    fn precheck(req: &ChatRequest) -> Result<(), GatewayError> {
        if req.history.is_empty() {
            return Err(GatewayError::invalid("history must contain at least one message"));
        }
        Ok(())
    }

    fn build_prompt(req: &ChatRequest) -> Vec<Message> {
        req.history.clone()
    }

    fn parse_and_validate(raw: &str, _req: &ChatRequest) -> Result<Answer, AnswerError> {
        let reply = raw.trim();
        if reply.is_empty() {
            return Err(AnswerError::Invalid("empty reply".into()));
        }
        Ok(Answer::Message(reply.to_string()))
    }

    fn fallback(_req: &ChatRequest, _picker: &MovePicker) -> Result<Answer, GatewayError> {
        Err(GatewayError::chat_unavailable(
            "The AI assistant is unavailable right now. Please try again later.",
        ))
    }
}
