//! Rate limiting configuration helpers
//!
//! Two independent per-client sliding windows:
//! - General traffic: 100 requests per 15 minutes, whole app
//! - AI route: 10 requests per minute, `/api/ask-ai` only
//!
//! The client is the connection peer. `X-Forwarded-For` is only consulted
//! when the peer is a trusted proxy, and then the rightmost untrusted entry
//! wins.
//!
//! Counters live in [`RateLimitBackends`], created once per process and cloned
//! into every worker so all workers share the same counts.

use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use actix_extensible_rate_limit::backend::SimpleInputFunctionBuilder;
use actix_web::dev::ServiceRequest;
use actix_web::{HttpResponse, ResponseError};

use super::sliding_window::SlidingWindowBackend;
use crate::error::AppError;
use crate::logging::security;

pub const GENERAL_WINDOW: Duration = Duration::from_secs(15 * 60);
pub const GENERAL_MAX_REQUESTS: u64 = 100;
pub const AI_WINDOW: Duration = Duration::from_secs(60);
pub const AI_MAX_REQUESTS: u64 = 10;

const GENERAL_DENIED: &str = "Too many requests from this IP, please try again later.";
const AI_DENIED: &str = "Too many AI requests from this IP, please wait a minute and try again.";

const FORWARDED_FOR: &str = "x-forwarded-for";

/// General traffic: 100 requests per 15 minutes per client address.
pub fn general_rate_limit_config(trusted: Arc<[IpAddr]>) -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(GENERAL_WINDOW, GENERAL_MAX_REQUESTS)
        .custom_fn(move |req| Ok(client_key(req, &trusted)))
}

/// AI route: 10 requests per 60 seconds per client address.
pub fn ai_rate_limit_config(trusted: Arc<[IpAddr]>) -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(AI_WINDOW, AI_MAX_REQUESTS)
        .custom_fn(move |req| Ok(client_key(req, &trusted)))
}

/// Shared counter stores for both windows, plus the proxies whose
/// forwarding headers are believed.
#[derive(Clone)]
pub struct RateLimitBackends {
    pub general: SlidingWindowBackend,
    pub ai: SlidingWindowBackend,
    pub trusted_proxies: Arc<[IpAddr]>,
}

impl RateLimitBackends {
    /// Fresh counters, no trusted proxies.
    pub fn new() -> Self {
        Self {
            general: SlidingWindowBackend::new(),
            ai: SlidingWindowBackend::new(),
            trusted_proxies: Arc::from(Vec::new()),
        }
    }

    pub fn with_trusted_proxies(mut self, proxies: Vec<IpAddr>) -> Self {
        self.trusted_proxies = Arc::from(proxies);
        self
    }
}

impl Default for RateLimitBackends {
    fn default() -> Self {
        Self::new()
    }
}

/// The address a request is attributed to.
pub fn client_ip(req: &ServiceRequest, trusted: &[IpAddr]) -> Option<IpAddr> {
    let peer = req.peer_addr()?.ip();
    if !trusted.contains(&peer) {
        return Some(peer);
    }
    Some(forwarded_client(req, trusted).unwrap_or(peer))
}

fn forwarded_client(req: &ServiceRequest, trusted: &[IpAddr]) -> Option<IpAddr> {
    let header = req.headers().get(FORWARDED_FOR)?.to_str().ok()?;
    for entry in header.rsplit(',') {
        let ip = parse_addr(entry.trim())?;
        if !trusted.contains(&ip) {
            return Some(ip);
        }
    }
    None
}

fn parse_addr(raw: &str) -> Option<IpAddr> {
    raw.parse::<IpAddr>()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
}

/// IPv6 clients are grouped per /64.
fn client_key(req: &ServiceRequest, trusted: &[IpAddr]) -> String {
    match client_ip(req, trusted) {
        Some(IpAddr::V4(v4)) => v4.to_string(),
        Some(IpAddr::V6(v6)) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => {
                let s = v6.segments();
                format!("{}/64", Ipv6Addr::new(s[0], s[1], s[2], s[3], 0, 0, 0, 0))
            }
        },
        None => "unknown".to_string(),
    }
}

/// `429` body for the general window.
pub fn general_denied() -> HttpResponse {
    denied("general", GENERAL_DENIED)
}

/// `429` body for the AI window.
pub fn ai_denied() -> HttpResponse {
    denied("/api/ask-ai", AI_DENIED)
}

fn denied(endpoint: &str, detail: &str) -> HttpResponse {
    security::rate_limit_hit(endpoint);
    AppError::rate_limited(detail).error_response()
}
