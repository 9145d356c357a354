use std::sync::Arc;

use tracing::warn;

use super::app_state::AppState;
use crate::ai::events::RecentEvents;
use crate::ai::{CompletionClient, Gateway, MovePicker, UpstreamClient};
use crate::config::UpstreamConfig;
use crate::error::AppError;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    upstream: Option<UpstreamConfig>,
    client: Option<Arc<dyn CompletionClient>>,
    seed: Option<u64>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Real upstream from configuration. `None` means fallback-only mode.
    pub fn with_upstream(mut self, config: Option<UpstreamConfig>) -> Self {
        self.upstream = config;
        self
    }

    /// Use a ready-made client instead of building one from configuration.
    pub fn with_client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Deterministic fallback picks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let client = match (self.client, self.upstream) {
            (Some(client), _) => Some(client),
            (None, Some(config)) => {
                let client = UpstreamClient::new(&config)
                    .map_err(|e| AppError::config(format!("cannot build upstream client: {e}")))?;
                Some(Arc::new(client) as Arc<dyn CompletionClient>)
            }
            (None, None) => {
                warn!("AI service not configured; every request will use the fallback policy");
                None
            }
        };

        let events = Arc::new(RecentEvents::new());
        let gateway = Gateway::new(client, MovePicker::new(self.seed), events.clone());
        Ok(AppState::new(Arc::new(gateway), events))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
