//! Test logging for the gateway test binaries.
//!
//! Installed once per process. Level comes from `TEST_LOG`, then `RUST_LOG`,
//! then a quiet default that still surfaces gateway fallbacks when asked for.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "warn,gateway=warn";

/// Install a test-writer subscriber. Safe to call from every test and from
/// `ctor` hooks; only the first call has any effect.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init()
            .ok();
    });
}
