use actix_extensible_rate_limit::RateLimiter;
use actix_web::web;

use crate::middleware::rate_limit::{
    ai_denied, ai_rate_limit_config, general_denied, general_rate_limit_config,
    RateLimitBackends,
};

pub mod ask_ai;
pub mod health;

/// Register every route behind the general limiter, with the stricter AI
/// limiter on `/api/ask-ai` only. Used by `main.rs` and the route tests alike.
pub fn configure(cfg: &mut web::ServiceConfig, backends: &RateLimitBackends) {
    let general = RateLimiter::builder(
        backends.general.clone(),
        general_rate_limit_config(backends.trusted_proxies.clone()).build(),
    )
    .add_headers()
    .request_denied_response(|_| general_denied())
    .build();

    let ai = RateLimiter::builder(
        backends.ai.clone(),
        ai_rate_limit_config(backends.trusted_proxies.clone()).build(),
    )
    .add_headers()
    .request_denied_response(|_| ai_denied())
    .build();

    cfg.service(
        web::scope("")
            .wrap(general)
            .service(web::scope("/api/ask-ai").wrap(ai).configure(ask_ai::configure_routes))
            .configure(health::configure_routes),
    );
}
