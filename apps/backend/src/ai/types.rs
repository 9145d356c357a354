//! Wire types shared by the classifier, adapters and route layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat turn. Order is significant and forwarded upstream verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

/// A Dots-and-Boxes line: index into `hLines` or `vLines` depending on orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMove {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxCell {
    pub owner: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DotsState {
    pub h_lines: Vec<Vec<bool>>,
    pub v_lines: Vec<Vec<bool>>,
    pub boxes: Vec<Vec<BoxCell>>,
}

impl DotsState {
    pub fn lines(&self, orientation: Orientation) -> &[Vec<bool>] {
        match orientation {
            Orientation::Horizontal => &self.h_lines,
            Orientation::Vertical => &self.v_lines,
        }
    }

    /// `Some(true)` if drawn, `Some(false)` if open, `None` if out of bounds.
    pub fn line(&self, mv: &LineMove) -> Option<bool> {
        self.lines(mv.orientation)
            .get(mv.row)
            .and_then(|row| row.get(mv.col))
            .copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: u8,
}

impl TriviaQuestion {
    pub fn new(question: &str, options: [&str; 4], correct: u8) -> Self {
        Self {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
        }
    }
}

/// Move payload: either a Dots-and-Boxes line or an element of the caller's
/// legal-move list, returned exactly as supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MoveValue {
    Line(LineMove),
    Notation(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Move(MoveValue),
    Message(String),
    Questions(Vec<TriviaQuestion>),
    Word(String),
}

/// Body of every `200` from the gateway. `error` is set when the answer came
/// from the fallback policy instead of the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskAiResponse {
    #[serde(flatten)]
    pub answer: Answer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AskAiResponse {
    pub fn answered(answer: Answer) -> Self {
        Self {
            answer,
            error: None,
        }
    }

    pub fn fell_back(answer: Answer, reason: impl Into<String>) -> Self {
        Self {
            answer,
            error: Some(reason.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Sampling parameters for one upstream call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Tuning {
    /// Move selection: precision over creativity.
    pub const fn precise(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            temperature: 0.2,
        }
    }

    /// Chat and content generation: creativity over precision.
    pub const fn creative(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            temperature: 0.7,
        }
    }
}
