//! Cleanup of raw model completions.
//!
//! Accepted transformations, applied until the text stops changing:
//! - trim surrounding whitespace;
//! - a fenced block (```` ``` ```` with an optional language tag) anywhere in the
//!   text is replaced by its inner content;
//! - a lone opening fence keeps what follows it, a lone closing fence keeps
//!   what precedes it.
//!
//! After cleanup, [`parse_json`] accepts the whole text as JSON or, failing
//! that, the first embedded object/array that parses, ignoring trailing prose.
//! Everything here is pure.

use serde_json::Value;
use thiserror::Error;

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("completion is empty")]
    Empty,
    #[error("completion is not JSON")]
    NotJson,
}

/// Strip whitespace and markdown fences. Idempotent.
pub fn clean(raw: &str) -> String {
    let mut current = raw;
    loop {
        let next = clean_once(current);
        if next.len() == current.len() {
            return next.to_string();
        }
        current = next;
    }
}

// Every step that changes the text makes it strictly shorter, so `clean` terminates.
fn clean_once(raw: &str) -> &str {
    let text = raw.trim();
    let Some(open) = text.find(FENCE) else {
        return text;
    };

    let after = &text[open + FENCE.len()..];
    let inner = match after.find(FENCE) {
        Some(close) => strip_language_tag(&after[..close]),
        None if open == 0 => strip_language_tag(after),
        None => &text[..open],
    };
    inner.trim()
}

/// Drop a ```` ```json ```` style tag: a run of tag characters directly after
/// the fence, followed by whitespace and then more content. A lone token is
/// the content itself (```` ```e2e4``` ````).
fn strip_language_tag(block: &str) -> &str {
    let tag_len = block
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')))
        .unwrap_or(block.len());
    if tag_len == 0 {
        return block;
    }
    let rest = &block[tag_len..];
    match rest.chars().next() {
        Some(c) if c.is_whitespace() && !rest.trim().is_empty() => rest,
        _ => block,
    }
}

/// Clean `raw` and parse it as JSON, falling back to the first embedded
/// object or array that parses.
pub fn parse_json(raw: &str) -> Result<Value, ParseError> {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return Err(ParseError::Empty);
    }
    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Ok(value);
    }
    embedded_json(&cleaned).ok_or(ParseError::NotJson)
}

fn embedded_json(text: &str) -> Option<Value> {
    text.char_indices()
        .filter(|(_, c)| matches!(c, '{' | '['))
        .find_map(|(start, _)| {
            serde_json::Deserializer::from_str(&text[start..])
                .into_iter::<Value>()
                .next()
                .and_then(Result::ok)
        })
}

/// Like [`parse_json`], but a completion that is not JSON at all is taken as
/// a bare token (`"e2e4"`, `"apple"`). `None` only for empty completions.
pub fn parse_or_token(raw: &str) -> Option<Value> {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return None;
    }
    match parse_json(&cleaned) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(cleaned)),
    }
}
