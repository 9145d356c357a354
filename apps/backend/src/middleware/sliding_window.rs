//! In-memory sliding-log backend for [`actix_extensible_rate_limit`].
//!
//! Every allowed request is stamped per key; a request is allowed while fewer
//! than `max_requests` stamps are younger than `interval`. Denied requests are
//! not recorded.

use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use actix_extensible_rate_limit::backend::{Backend, Decision, SimpleInput, SimpleOutput};
use actix_web::rt::time::Instant;
use parking_lot::Mutex;

#[derive(Clone, Default)]
pub struct SlidingWindowBackend {
    log: Arc<Mutex<HitLog>>,
}

#[derive(Default)]
struct HitLog {
    hits: HashMap<String, VecDeque<Instant>>,
    last_sweep: Option<Instant>,
}

impl HitLog {
    /// Drop idle keys at most once per window.
    fn sweep(&mut self, now: Instant, interval: Duration) {
        if self
            .last_sweep
            .is_some_and(|last| now.duration_since(last) < interval)
        {
            return;
        }
        self.hits.retain(|_, stamps| {
            prune(stamps, now, interval);
            !stamps.is_empty()
        });
        self.last_sweep = Some(now);
    }
}

fn prune(stamps: &mut VecDeque<Instant>, now: Instant, interval: Duration) {
    while stamps
        .front()
        .is_some_and(|oldest| now.duration_since(*oldest) >= interval)
    {
        stamps.pop_front();
    }
}

impl SlidingWindowBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.log.lock().hits.len()
    }
}

impl Backend<SimpleInput> for SlidingWindowBackend {
    type Output = SimpleOutput;
    type RollbackToken = (String, Instant);
    type Error = Infallible;

    async fn request(
        &self,
        input: SimpleInput,
    ) -> Result<(Decision, Self::Output, Self::RollbackToken), Self::Error> {
        let now = Instant::now();
        let mut log = self.log.lock();
        log.sweep(now, input.interval);

        let stamps = log.hits.entry(input.key.clone()).or_default();
        prune(stamps, now, input.interval);

        let allowed = (stamps.len() as u64) < input.max_requests;
        if allowed {
            stamps.push_back(now);
        }

        let output = SimpleOutput {
            limit: input.max_requests,
            remaining: input.max_requests.saturating_sub(stamps.len() as u64),
            reset: stamps
                .front()
                .map_or(now, |oldest| *oldest + input.interval),
        };
        Ok((Decision::from_allowed(allowed), output, (input.key, now)))
    }

    async fn rollback(&self, (key, stamp): Self::RollbackToken) -> Result<(), Self::Error> {
        let mut log = self.log.lock();
        if let Some(stamps) = log.hits.get_mut(&key) {
            if let Some(pos) = stamps.iter().rposition(|s| *s == stamp) {
                stamps.remove(pos);
            }
        }
        Ok(())
    }
}
