use serde::Deserialize;
use serde_json::Value;

use super::{AdapterKind, Protocol};
use crate::ai::fallback::{word_list, MovePicker};
use crate::ai::parser;
use crate::ai::types::{Answer, Difficulty, Message, Tuning};
use crate::ai::validate::{self, AnswerError};
use crate::errors::GatewayError;

/// Shared shape of the content-generator requests (word and trivia).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorRequest {
    pub difficulty: Difficulty,
    pub system_prompt: String,
    #[serde(default)]
    pub user_message: Option<String>,
}

impl GeneratorRequest {
    /// Caller's user message, or `default` when absent or blank.
    pub(super) fn instruction<'a>(&'a self, default: &'a str) -> &'a str {
        self.user_message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(default)
    }
}

fn difficulty_hint(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "a common word of 3 to 5 letters that young children know",
        Difficulty::Medium => "a familiar word of 6 to 8 letters",
        Difficulty::Hard => "a less common word of 8 or more letters",
    }
}

pub struct WordGenerator;

impl Protocol for WordGenerator {
    type Request = GeneratorRequest;

    const KIND: AdapterKind = AdapterKind::WordGenerator;
    const TUNING: Tuning = Tuning::creative(300);

    fn build_prompt(req: &GeneratorRequest) -> Vec<Message> {
        let user = format!(
            "{}\n\nDifficulty: {} ({}).\nRespond only with JSON of the form {{\"word\": \"<word>\"}}. \
             The word must be a single word with no spaces.",
            req.instruction("Give me one word for a word-guessing game."),
            req.difficulty,
            difficulty_hint(req.difficulty),
        );
        vec![Message::system(req.system_prompt.clone()), Message::user(user)]
    }

    fn parse_and_validate(raw: &str, _req: &GeneratorRequest) -> Result<Answer, AnswerError> {
        let candidate = match parser::parse_or_token(raw) {
            Some(Value::Object(map)) => match map.get("word") {
                Some(Value::String(w)) => w.clone(),
                _ => return Err(AnswerError::Malformed("missing string field 'word'".into())),
            },
            Some(Value::String(w)) => w,
            Some(other) => {
                return Err(AnswerError::Malformed(format!("expected a word, got {other}")))
            }
            None => return Err(AnswerError::Parse(parser::ParseError::Empty)),
        };
        validate::word(&candidate).map(Answer::Word)
    }

    fn fallback(req: &GeneratorRequest, picker: &MovePicker) -> Result<Answer, GatewayError> {
        let word = picker
            .pick(word_list(req.difficulty))
            .copied()
            .unwrap_or("apple");
        Ok(Answer::Word(word.to_string()))
    }
}
