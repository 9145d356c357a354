//! Request classification.
//!
//! Payloads carry no explicit discriminator in most cases, so the adapter is
//! picked by shape. [`RULES`] is evaluated in order and the first match wins;
//! several shapes overlap, so the order is part of the contract.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use super::adapters::{
    AdapterKind, ChatRequest, CheckersRequest, ChessRequest, DotsRequest, GeneratorRequest,
};
use crate::errors::GatewayError;

type Body = Map<String, Value>;

/// A payload matched to exactly one adapter.
#[derive(Debug, Clone)]
pub enum GameRequest {
    Checkers(CheckersRequest),
    Chess(ChessRequest),
    DotsAndBoxes(DotsRequest),
    WordGenerator(GeneratorRequest),
    TriviaGenerator(GeneratorRequest),
    Chat(ChatRequest),
}

impl GameRequest {
    pub fn kind(&self) -> AdapterKind {
        match self {
            Self::Checkers(_) => AdapterKind::Checkers,
            Self::Chess(_) => AdapterKind::Chess,
            Self::DotsAndBoxes(_) => AdapterKind::DotsAndBoxes,
            Self::WordGenerator(_) => AdapterKind::WordGenerator,
            Self::TriviaGenerator(_) => AdapterKind::TriviaGenerator,
            Self::Chat(_) => AdapterKind::Chat,
        }
    }
}

/// Ordered shape predicates. Earlier rules shadow later ones.
pub const RULES: [(AdapterKind, fn(&Body) -> bool); 6] = [
    (AdapterKind::Checkers, is_checkers),
    (AdapterKind::Chess, is_chess),
    (AdapterKind::DotsAndBoxes, is_dots),
    (AdapterKind::WordGenerator, is_word_generator),
    (AdapterKind::TriviaGenerator, is_trivia_generator),
    (AdapterKind::Chat, is_chat),
];

const WRAPPERS: [(&str, fn(&Value) -> bool); 2] = [("checkers", Value::is_array), ("chess", Value::is_string)];
const WRAPPED_FIELDS: [&str; 3] = ["board", "possibleMoves", "systemPrompt"];

fn is_checkers(body: &Body) -> bool {
    body.get("board").is_some_and(Value::is_array)
        && body.get("possibleMoves").is_some_and(Value::is_array)
}

fn is_chess(body: &Body) -> bool {
    body.get("board").is_some_and(Value::is_string)
        && body.get("possibleMoves").is_some_and(Value::is_array)
}

fn is_game(body: &Body, game: &str) -> bool {
    body.get("game").and_then(Value::as_str) == Some(game)
}

fn is_dots(body: &Body) -> bool {
    is_game(body, "dots-and-boxes")
        && body.get("state").is_some_and(|s| !s.is_null())
        && body.get("player").is_some_and(Value::is_number)
}

fn is_generator(body: &Body, game: &str) -> bool {
    is_game(body, game)
        && body.get("difficulty").is_some_and(|d| !d.is_null())
        && body.get("systemPrompt").is_some_and(|p| !p.is_null())
}

fn is_word_generator(body: &Body) -> bool {
    is_generator(body, "word-guess-generator")
}

fn is_trivia_generator(body: &Body) -> bool {
    is_generator(body, "trivia-generator")
}

fn is_chat(body: &Body) -> bool {
    body.get("history").is_some_and(Value::is_array)
}

/// Lift a `checkers`/`chess` wrapper's board, moves and prompt to the top
/// level when the wrapper holds a board of the right kind plus a move list.
fn unwrap_game_wrapper(body: &mut Body) {
    for (key, board_fits) in WRAPPERS {
        let fits = body.get(key).and_then(Value::as_object).is_some_and(|inner| {
            inner.get("board").is_some_and(board_fits)
                && inner.get("possibleMoves").is_some_and(Value::is_array)
        });
        if !fits {
            continue;
        }
        if let Some(Value::Object(inner)) = body.remove(key) {
            for (field, value) in inner {
                if WRAPPED_FIELDS.contains(&field.as_str()) {
                    body.insert(field, value);
                }
            }
        }
        return;
    }
}

/// First matching adapter for an already-unwrapped body.
pub fn select(body: &Body) -> Option<AdapterKind> {
    RULES
        .iter()
        .find(|(_, matches)| matches(body))
        .map(|(kind, _)| *kind)
}

pub fn classify(body: Value) -> Result<GameRequest, GatewayError> {
    let Value::Object(mut body) = body else {
        return Err(GatewayError::unrecognized(Vec::new()));
    };
    let received: Vec<String> = body.keys().cloned().collect();

    unwrap_game_wrapper(&mut body);

    let Some(kind) = select(&body) else {
        debug!(?received, "payload matched no protocol");
        return Err(GatewayError::unrecognized(received));
    };
    debug!(adapter = %kind, "classified request");

    if kind == AdapterKind::DotsAndBoxes {
        require_dots_state(&body)?;
    }

    let body = Value::Object(body);
    Ok(match kind {
        AdapterKind::Checkers => GameRequest::Checkers(decode(kind, body)?),
        AdapterKind::Chess => GameRequest::Chess(decode(kind, body)?),
        AdapterKind::DotsAndBoxes => GameRequest::DotsAndBoxes(decode(kind, body)?),
        AdapterKind::WordGenerator => GameRequest::WordGenerator(decode(kind, body)?),
        AdapterKind::TriviaGenerator => GameRequest::TriviaGenerator(decode(kind, body)?),
        AdapterKind::Chat => GameRequest::Chat(decode(kind, body)?),
    })
}

fn require_dots_state(body: &Body) -> Result<(), GatewayError> {
    let state = body.get("state").and_then(Value::as_object);
    let missing: Vec<&str> = ["hLines", "vLines", "boxes"]
        .into_iter()
        .filter(|field| state.and_then(|s| s.get(*field)).is_none())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(GatewayError::invalid(format!(
            "dots-and-boxes state is missing {}",
            missing.join(", ")
        )))
    }
}

fn decode<T: DeserializeOwned>(kind: AdapterKind, body: Value) -> Result<T, GatewayError> {
    serde_json::from_value(body).map_err(|e| GatewayError::invalid(format!("{kind} request: {e}")))
}
