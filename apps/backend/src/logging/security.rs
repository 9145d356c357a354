use tracing::warn;

use crate::trace_ctx;

/// Log a security-relevant rate-limit event.
pub fn rate_limit_hit(endpoint: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_RATE_LIMIT_HIT",
        %trace_id,
        endpoint,
        "Rate limit exceeded"
    );
}

/// Log an upstream credential rejection. The key itself is never logged.
pub fn upstream_auth_rejected(status: u16) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_UPSTREAM_AUTH_REJECTED",
        %trace_id,
        status,
        "Upstream rejected the configured API key"
    );
}
