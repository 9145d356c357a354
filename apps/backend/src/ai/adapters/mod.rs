//! Per-game protocol adapters.
//!
//! Each adapter knows how to turn its request into a prompt, how to read the
//! model's answer back, and how to answer locally when the model can't.

mod chat;
mod checkers;
mod chess;
mod dots;
mod trivia;
mod word;

use std::fmt;

use serde_json::Value;

pub use chat::{Chat, ChatRequest};
pub use checkers::{Checkers, CheckersRequest};
pub use chess::{Chess, ChessRequest};
pub use dots::{DotsAndBoxes, DotsRequest};
pub use trivia::TriviaGenerator;
pub use word::{GeneratorRequest, WordGenerator};

use super::fallback::MovePicker;
use super::parser;
use super::types::{Answer, Message, Tuning};
use super::validate::AnswerError;
use crate::errors::GatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    Checkers,
    Chess,
    DotsAndBoxes,
    WordGenerator,
    TriviaGenerator,
    Chat,
}

impl AdapterKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Checkers => "checkers",
            Self::Chess => "chess",
            Self::DotsAndBoxes => "dots-and-boxes",
            Self::WordGenerator => "word-guess-generator",
            Self::TriviaGenerator => "trivia-generator",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Protocol {
    type Request;

    const KIND: AdapterKind;
    /// Fixed per adapter; never taken from the caller.
    const TUNING: Tuning;

    /// Terminal caller errors detected before any upstream call.
    fn precheck(_req: &Self::Request) -> Result<(), GatewayError> {
        Ok(())
    }

    fn build_prompt(req: &Self::Request) -> Vec<Message>;

    fn parse_and_validate(raw: &str, req: &Self::Request) -> Result<Answer, AnswerError>;

    /// Network-free answer. Fails only for caller errors or when the
    /// protocol has no local answer (chat).
    fn fallback(req: &Self::Request, picker: &MovePicker) -> Result<Answer, GatewayError>;
}

/// System prompt from the caller if given, else the adapter default, plus
/// the serialized state as the user turn.
fn state_prompt(default_system: &str, system_prompt: Option<&str>, state: Value) -> Vec<Message> {
    let system = system_prompt
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default_system);
    vec![Message::system(system), Message::user(state.to_string())]
}

/// Move candidate from a completion: `{"move": m}`, a JSON value, or the bare token.
fn move_candidate(raw: &str) -> Result<Value, AnswerError> {
    match parser::parse_or_token(raw) {
        Some(Value::Object(mut map)) if map.contains_key("move") => {
            Ok(map.remove("move").unwrap_or(Value::Null))
        }
        Some(value) => Ok(value),
        None => Err(AnswerError::Parse(parser::ParseError::Empty)),
    }
}

fn require_moves<T>(possible_moves: &[T]) -> Result<(), GatewayError> {
    if possible_moves.is_empty() {
        return Err(GatewayError::no_legal_moves("possibleMoves is empty"));
    }
    Ok(())
}
