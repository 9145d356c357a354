use serde::Deserialize;
use serde_json::{json, Value};

use super::{move_candidate, require_moves, state_prompt, AdapterKind, Protocol};
use crate::ai::fallback::MovePicker;
use crate::ai::types::{Answer, Message, MoveValue, Tuning};
use crate::ai::validate::{require_member, AnswerError};
use crate::errors::GatewayError;

const SYSTEM_PROMPT: &str = "You are playing checkers. You receive the board and the list of legal \
moves. Choose the strongest move from that list. Reply with the chosen move copied exactly as it \
appears in the list, and nothing else.";

/// Board is the caller's 2-D grid; moves may be strings or structured values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckersRequest {
    pub board: Vec<Value>,
    pub possible_moves: Vec<Value>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

pub struct Checkers;

impl Protocol for Checkers {
    type Request = CheckersRequest;

    const KIND: AdapterKind = AdapterKind::Checkers;
    const TUNING: Tuning = Tuning::precise(32);

    fn precheck(req: &CheckersRequest) -> Result<(), GatewayError> {
        require_moves(&req.possible_moves)
    }

    fn build_prompt(req: &CheckersRequest) -> Vec<Message> {
        state_prompt(
            SYSTEM_PROMPT,
            req.system_prompt.as_deref(),
            json!({"board": req.board, "possibleMoves": req.possible_moves}),
        )
    }

    fn parse_and_validate(raw: &str, req: &CheckersRequest) -> Result<Answer, AnswerError> {
        let candidate = move_candidate(raw)?;
        let chosen = require_member(&candidate, &req.possible_moves)?;
        Ok(Answer::Move(MoveValue::Notation(chosen.clone())))
    }

    fn fallback(req: &CheckersRequest, picker: &MovePicker) -> Result<Answer, GatewayError> {
        picker
            .pick(&req.possible_moves)
            .map(|m| Answer::Move(MoveValue::Notation(m.clone())))
            .ok_or_else(|| GatewayError::no_legal_moves("possibleMoves is empty"))
    }
}
