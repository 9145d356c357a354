//! AI gateway - turns game-specific requests into model prompts and model
//! output back into answers the game clients can trust.
//!
//! This module provides:
//! - request classification by payload shape
//! - per-game protocol adapters (prompt, parse, validate, fallback)
//! - the upstream completion client and its test seam
//! - the outcome event boundary

pub mod adapters;
pub mod classify;
pub mod client;
pub mod events;
pub mod fallback;
pub mod gateway;
pub mod parser;
pub mod types;
pub mod validate;

pub use adapters::{AdapterKind, Protocol};
pub use classify::{classify, GameRequest};
pub use client::{CompletionClient, UpstreamClient, UpstreamError};
pub use events::{EventSink, EventSummary, GatewayEvent, Outcome, RecentEvents};
pub use fallback::MovePicker;
pub use gateway::{AskFailure, Gateway};
pub use types::{Answer, AskAiResponse, Message, Role, Tuning};
