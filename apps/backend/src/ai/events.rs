//! Outcome events emitted by the gateway.
//!
//! The gateway only knows about [`EventSink`]. Anything that wants to count,
//! persist or ship these events implements the trait.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde::Serialize;

use super::adapters::AdapterKind;

pub const RECENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The model's answer was returned.
    Model,
    /// A local answer was returned; carries the reason.
    Fallback(String),
    /// No answer at all (chat failure, no legal moves, bad request).
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayEvent {
    pub adapter: AdapterKind,
    pub outcome: Outcome,
    pub elapsed_ms: u64,
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: GatewayEvent);
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: GatewayEvent) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub total: usize,
    pub model: usize,
    pub fallback: usize,
    pub failed: usize,
}

/// Bounded in-memory history; the oldest event is evicted first.
#[derive(Debug)]
pub struct RecentEvents {
    capacity: usize,
    events: Mutex<VecDeque<GatewayEvent>>,
}

impl RecentEvents {
    pub fn new() -> Self {
        Self::with_capacity(RECENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Oldest first.
    pub fn snapshot(&self) -> Vec<GatewayEvent> {
        self.events.lock().iter().cloned().collect()
    }

    pub fn summary(&self) -> EventSummary {
        let events = self.events.lock();
        events
            .iter()
            .fold(EventSummary::default(), |mut summary, event| {
                summary.total += 1;
                match event.outcome {
                    Outcome::Model => summary.model += 1,
                    Outcome::Fallback(_) => summary.fallback += 1,
                    Outcome::Failed(_) => summary.failed += 1,
                }
                summary
            })
    }
}

impl Default for RecentEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecentEvents {
    fn record(&self, event: GatewayEvent) {
        let mut events = self.events.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }
}
