use std::sync::Arc;

use crate::ai::events::RecentEvents;
use crate::ai::Gateway;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    /// Same store the gateway records into; read by `/health`.
    pub events: Arc<RecentEvents>,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>, events: Arc<RecentEvents>) -> Self {
        Self { gateway, events }
    }

    /// `"configured"` when an upstream client is wired, else `"fallback_only"`.
    pub fn upstream_mode(&self) -> &'static str {
        if self.gateway.is_configured() {
            "configured"
        } else {
            "fallback_only"
        }
    }
}
