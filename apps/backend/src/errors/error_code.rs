//! Error codes for the gateway API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request classification & shape
    /// Payload matched none of the known game protocols
    UnrecognizedRequest,
    /// Payload matched a protocol but its fields are malformed
    InvalidRequest,
    /// Body was not valid JSON
    BadRequest,

    // Caller state
    /// Caller supplied an empty legal-move set or a full board
    NoLegalMoves,

    // Throttling
    /// Per-IP request budget exhausted
    RateLimited,

    // Server side
    /// Chat has no local answer when the model is unavailable
    ChatUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnrecognizedRequest => "UNRECOGNIZED_REQUEST",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::BadRequest => "BAD_REQUEST",
            Self::NoLegalMoves => "NO_LEGAL_MOVES",
            Self::RateLimited => "RATE_LIMITED",
            Self::ChatUnavailable => "CHAT_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
