//! Checks applied to a parsed model answer before it is returned.
//!
//! Legality is only ever checked against what the caller sent (legal-move
//! list, line grid); no game rules are computed here.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::parser::ParseError;
use super::types::{DotsState, LineMove, TriviaQuestion};

pub const TRIVIA_BATCH_SIZE: usize = 5;
pub const TRIVIA_OPTION_COUNT: usize = 4;
pub const MIN_WORD_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("malformed answer: {0}")]
    Malformed(String),
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("invalid answer: {0}")]
    Invalid(String),
}

/// Exact membership: no trimming, case folding or notation normalization.
pub fn require_member<'a, T>(candidate: &T, legal: &'a [T]) -> Result<&'a T, AnswerError>
where
    T: PartialEq + fmt::Display,
{
    legal
        .iter()
        .find(|m| *m == candidate)
        .ok_or_else(|| AnswerError::IllegalMove(format!("{candidate} is not in possibleMoves")))
}

/// Structural decode of a Dots-and-Boxes line, accepting an optional `move` wrapper.
pub fn line_move(value: Value) -> Result<LineMove, AnswerError> {
    let value = match value {
        Value::Object(mut map) if map.contains_key("move") => map.remove("move").unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| AnswerError::Malformed(format!("expected {{row, col, orientation}}: {e}")))
}

/// The line must exist in the caller's grid and not be drawn yet.
pub fn require_open_line(mv: &LineMove, state: &DotsState) -> Result<(), AnswerError> {
    match state.line(mv) {
        Some(false) => Ok(()),
        Some(true) => Err(AnswerError::IllegalMove(format!(
            "line {:?} ({}, {}) is already drawn",
            mv.orientation, mv.row, mv.col
        ))),
        None => Err(AnswerError::IllegalMove(format!(
            "line {:?} ({}, {}) is outside the board",
            mv.orientation, mv.row, mv.col
        ))),
    }
}

pub fn word(candidate: &str) -> Result<String, AnswerError> {
    if candidate.is_empty() {
        return Err(AnswerError::Invalid("word is empty".into()));
    }
    if candidate.contains(char::is_whitespace) {
        return Err(AnswerError::Invalid("word contains whitespace".into()));
    }
    if candidate.chars().count() < MIN_WORD_LEN {
        return Err(AnswerError::Invalid(format!(
            "word is shorter than {MIN_WORD_LEN} characters"
        )));
    }
    Ok(candidate.to_string())
}

#[derive(Deserialize)]
struct RawQuestion {
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: Vec<String>,
    correct: i64,
}

/// All-or-nothing: one bad question rejects the batch.
pub fn trivia_batch(value: Value) -> Result<Vec<TriviaQuestion>, AnswerError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("questions") {
            Some(Value::Array(items)) => items,
            _ => return Err(AnswerError::Malformed("expected a questions array".into())),
        },
        _ => return Err(AnswerError::Malformed("expected a questions array".into())),
    };

    if items.len() != TRIVIA_BATCH_SIZE {
        return Err(AnswerError::Invalid(format!(
            "expected {TRIVIA_BATCH_SIZE} questions, got {}",
            items.len()
        )));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| trivia_question(i, item))
        .collect()
}

fn trivia_question(index: usize, item: Value) -> Result<TriviaQuestion, AnswerError> {
    let raw: RawQuestion = serde_json::from_value(item)
        .map_err(|e| AnswerError::Malformed(format!("question {index}: {e}")))?;

    if raw.question.trim().is_empty() {
        return Err(AnswerError::Invalid(format!("question {index} has no text")));
    }
    if raw.options.len() != TRIVIA_OPTION_COUNT {
        return Err(AnswerError::Invalid(format!(
            "question {index} has {} options",
            raw.options.len()
        )));
    }
    let correct = u8::try_from(raw.correct)
        .ok()
        .filter(|c| usize::from(*c) < TRIVIA_OPTION_COUNT)
        .ok_or_else(|| {
            AnswerError::Invalid(format!("question {index} has correct index {}", raw.correct))
        })?;

    Ok(TriviaQuestion {
        question: raw.question,
        options: raw.options,
        correct,
    })
}
