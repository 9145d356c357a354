//! Scripted upstream for tests: replays queued replies, then repeats a default.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use gateway::ai::{CompletionClient, Message, Tuning, UpstreamError};
use parking_lot::Mutex;

pub struct ScriptedClient {
    queued: Mutex<VecDeque<Result<String, UpstreamError>>>,
    otherwise: Result<String, UpstreamError>,
    calls: AtomicUsize,
    last: Mutex<Option<(Vec<Message>, Tuning)>>,
}

impl ScriptedClient {
    fn with_default(otherwise: Result<String, UpstreamError>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            otherwise,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Every call returns `text`.
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self::with_default(Ok(text.to_string())))
    }

    /// Every call fails with `error`.
    pub fn failing(error: UpstreamError) -> Arc<Self> {
        Arc::new(Self::with_default(Err(error)))
    }

    /// Queue a one-off reply ahead of the default.
    pub fn push(&self, reply: Result<String, UpstreamError>) {
        self.queued.lock().push_back(reply);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt and tuning of the most recent call.
    pub fn last_call(&self) -> Option<(Vec<Message>, Tuning)> {
        self.last.lock().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, messages: &[Message], tuning: Tuning) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock() = Some((messages.to_vec(), tuning));
        let queued = self.queued.lock().pop_front();
        queued.unwrap_or_else(|| self.otherwise.clone())
    }
}
