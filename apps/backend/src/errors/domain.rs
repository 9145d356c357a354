//! Gateway-level error type.
//!
//! HTTP-agnostic: the classifier, adapters and fallback policy return
//! `GatewayError`, and the route layer converts it with
//! `From<GatewayError> for AppError`. Upstream and answer failures are not
//! represented here because they never become an error response.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No protocol matched the payload shape. Carries the received top-level keys.
    #[error("unrecognized request shape")]
    Unrecognized { received: Vec<String> },
    /// A protocol matched but its fields are malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Well-formed request with nothing left to play.
    #[error("no legal moves: {0}")]
    NoLegalMoves(String),
    /// Chat could not be answered and has no local fallback.
    #[error("chat unavailable: {0}")]
    ChatUnavailable(String),
}

impl GatewayError {
    pub fn unrecognized(received: Vec<String>) -> Self {
        Self::Unrecognized { received }
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidRequest(detail.into())
    }

    pub fn no_legal_moves(detail: impl Into<String>) -> Self {
        Self::NoLegalMoves(detail.into())
    }

    pub fn chat_unavailable(detail: impl Into<String>) -> Self {
        Self::ChatUnavailable(detail.into())
    }
}
