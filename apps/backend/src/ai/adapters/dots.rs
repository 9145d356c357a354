use serde::Deserialize;
use serde_json::json;

use super::{state_prompt, AdapterKind, Protocol};
use crate::ai::fallback::{first_open_line, MovePicker};
use crate::ai::parser;
use crate::ai::types::{Answer, DotsState, Message, MoveValue, Tuning};
use crate::ai::validate::{line_move, require_open_line, AnswerError};
use crate::errors::GatewayError;

const SYSTEM_PROMPT: &str = "You are playing Dots and Boxes. hLines[row][col] and vLines[row][col] \
are true when that line is already drawn. Choose one line that is not drawn yet, preferring lines \
that complete a box and avoiding lines that give the opponent a box. Reply only with JSON: \
{\"row\": <number>, \"col\": <number>, \"orientation\": \"h\" or \"v\"}.";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DotsRequest {
    pub state: DotsState,
    pub player: i64,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

pub struct DotsAndBoxes;

impl Protocol for DotsAndBoxes {
    type Request = DotsRequest;

    const KIND: AdapterKind = AdapterKind::DotsAndBoxes;
    const TUNING: Tuning = Tuning::precise(32);

    fn precheck(req: &DotsRequest) -> Result<(), GatewayError> {
        first_open_line(&req.state)
            .map(|_| ())
            .ok_or_else(|| GatewayError::no_legal_moves("every line is already drawn"))
    }

    fn build_prompt(req: &DotsRequest) -> Vec<Message> {
        state_prompt(
            SYSTEM_PROMPT,
            req.system_prompt.as_deref(),
            json!({"state": req.state, "player": req.player}),
        )
    }

    fn parse_and_validate(raw: &str, req: &DotsRequest) -> Result<Answer, AnswerError> {
        let mv = line_move(parser::parse_json(raw)?)?;
        require_open_line(&mv, &req.state)?;
        Ok(Answer::Move(MoveValue::Line(mv)))
    }

    fn fallback(req: &DotsRequest, _picker: &MovePicker) -> Result<Answer, GatewayError> {
        first_open_line(&req.state)
            .map(|mv| Answer::Move(MoveValue::Line(mv)))
            .ok_or_else(|| GatewayError::no_legal_moves("every line is already drawn"))
    }
}
