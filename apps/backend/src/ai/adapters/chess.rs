use serde::Deserialize;
use serde_json::{json, Value};

use super::{move_candidate, require_moves, state_prompt, AdapterKind, Protocol};
use crate::ai::fallback::MovePicker;
use crate::ai::types::{Answer, Message, MoveValue, Tuning};
use crate::ai::validate::{require_member, AnswerError};
use crate::errors::GatewayError;

const SYSTEM_PROMPT: &str = "You are a chess engine. You receive the position as FEN and the list \
of legal moves. Pick the best move from the list. Reply with only that move, written exactly as \
in the list. No explanation.";

/// `board` is a FEN string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChessRequest {
    pub board: String,
    pub possible_moves: Vec<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

pub struct Chess;

impl Protocol for Chess {
    type Request = ChessRequest;

    const KIND: AdapterKind = AdapterKind::Chess;
    const TUNING: Tuning = Tuning::precise(16);

    fn precheck(req: &ChessRequest) -> Result<(), GatewayError> {
        require_moves(&req.possible_moves)
    }

    fn build_prompt(req: &ChessRequest) -> Vec<Message> {
        state_prompt(
            SYSTEM_PROMPT,
            req.system_prompt.as_deref(),
            json!({"board": req.board, "possibleMoves": req.possible_moves}),
        )
    }

    fn parse_and_validate(raw: &str, req: &ChessRequest) -> Result<Answer, AnswerError> {
        let candidate = match move_candidate(raw)? {
            Value::String(s) => s,
            other => {
                return Err(AnswerError::Malformed(format!(
                    "expected a move string, got {other}"
                )))
            }
        };
        let chosen = require_member(&candidate, &req.possible_moves)?;
        Ok(Answer::Move(MoveValue::Notation(Value::String(chosen.clone()))))
    }

    fn fallback(req: &ChessRequest, picker: &MovePicker) -> Result<Answer, GatewayError> {
        picker
            .pick(&req.possible_moves)
            .map(|m| Answer::Move(MoveValue::Notation(Value::String(m.clone()))))
            .ok_or_else(|| GatewayError::no_legal_moves("possibleMoves is empty"))
    }
}
