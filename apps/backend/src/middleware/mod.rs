pub mod cors;
pub mod rate_limit;
pub mod request_trace;
pub mod security_headers;
pub mod sliding_window;
pub mod structured_logger;
pub mod trace_span;

pub use cors::cors_middleware;
pub use rate_limit::RateLimitBackends;
pub use request_trace::{RequestTrace, TraceId};
pub use security_headers::SecurityHeaders;
pub use sliding_window::SlidingWindowBackend;
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
