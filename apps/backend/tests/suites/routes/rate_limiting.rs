// Tests for rate limiting middleware
//
// Verifies the AI window on /api/ask-ai and the general window on the rest
// of the app, keyed by client IP.

use actix_web::test;
use gateway::middleware::rate_limit::{AI_MAX_REQUESTS, GENERAL_MAX_REQUESTS};
use gateway::middleware::RateLimitBackends;
use serde_json::{json, Value};

use crate::support::app_builder::{
    ask, ask_from, ask_via, fallback_only_state, get, init_app, init_app_with_limits, state_with,
};
use crate::support::scripted_client::ScriptedClient;

fn chess() -> Value {
    json!({"board": "fen", "possibleMoves": ["e4", "d4"]})
}

#[actix_web::test]
async fn eleventh_ai_request_is_rejected_without_calling_upstream() {
    let client = ScriptedClient::replying("e4");
    let app = init_app(state_with(client.clone())).await;

    for i in 0..AI_MAX_REQUESTS {
        let resp = test::call_service(&app, ask(&chess())).await;
        assert_eq!(resp.status().as_u16(), 200, "request {} should succeed", i + 1);
        assert!(
            resp.headers().contains_key("x-ratelimit-remaining"),
            "request {} should include rate limit headers",
            i + 1
        );
    }

    let resp = test::call_service(&app, ask(&chess())).await;
    assert_eq!(resp.status().as_u16(), 429);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "RATE_LIMITED");
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

    assert_eq!(client.calls(), AI_MAX_REQUESTS as usize, "denied request never reaches upstream");
}

#[actix_web::test]
async fn ai_window_is_per_client_ip() {
    let app = init_app(fallback_only_state()).await;

    for _ in 0..AI_MAX_REQUESTS {
        test::call_service(&app, ask_from("198.51.100.1", &chess())).await;
    }
    let blocked = test::call_service(&app, ask_from("198.51.100.1", &chess())).await;
    assert_eq!(blocked.status().as_u16(), 429);

    let other = test::call_service(&app, ask_from("198.51.100.2", &chess())).await;
    assert_eq!(other.status().as_u16(), 200);
}

#[actix_web::test]
async fn ai_window_does_not_cover_health() {
    let app = init_app(fallback_only_state()).await;

    for _ in 0..=AI_MAX_REQUESTS {
        test::call_service(&app, ask(&chess())).await;
    }

    let resp = test::call_service(&app, get("/health")).await;
    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_web::test]
async fn general_window_covers_every_route() {
    let app = init_app(fallback_only_state()).await;

    for i in 0..GENERAL_MAX_REQUESTS {
        let resp = test::call_service(&app, get("/health")).await;
        assert_eq!(resp.status().as_u16(), 200, "request {} should succeed", i + 1);
    }

    let resp = test::call_service(&app, get("/health")).await;
    assert_eq!(resp.status().as_u16(), 429);

    // Already over the general window, so the AI route is denied too.
    let resp = test::call_service(&app, ask(&chess())).await;
    assert_eq!(resp.status().as_u16(), 429);
}

#[actix_web::test]
async fn rotating_forwarded_for_does_not_escape_ai_window() {
    let client = ScriptedClient::replying("e4");
    let app = init_app(state_with(client.clone())).await;

    for i in 0..AI_MAX_REQUESTS {
        let spoofed = format!("10.0.0.{i}");
        let resp = test::call_service(&app, ask_via("192.0.2.50", &spoofed, &chess())).await;
        assert_eq!(resp.status().as_u16(), 200, "request {} should succeed", i + 1);
    }

    let resp = test::call_service(&app, ask_via("192.0.2.50", "10.0.0.99", &chess())).await;
    assert_eq!(resp.status().as_u16(), 429);
    assert_eq!(client.calls(), AI_MAX_REQUESTS as usize);
}

#[actix_web::test]
async fn trusted_proxy_is_keyed_by_forwarded_client() {
    let backends = RateLimitBackends::new().with_trusted_proxies(vec!["192.0.2.1".parse().unwrap()]);
    let app = init_app_with_limits(fallback_only_state(), backends).await;

    for _ in 0..AI_MAX_REQUESTS {
        test::call_service(&app, ask_via("192.0.2.1", "198.51.100.1", &chess())).await;
    }
    let blocked = test::call_service(&app, ask_via("192.0.2.1", "198.51.100.1", &chess())).await;
    assert_eq!(blocked.status().as_u16(), 429);

    let other = test::call_service(&app, ask_via("192.0.2.1", "198.51.100.2", &chess())).await;
    assert_eq!(other.status().as_u16(), 200);
}

#[actix_web::test]
async fn spoofed_entries_left_of_the_proxy_hop_are_ignored() {
    let backends = RateLimitBackends::new().with_trusted_proxies(vec!["192.0.2.1".parse().unwrap()]);
    let app = init_app_with_limits(fallback_only_state(), backends).await;

    for i in 0..AI_MAX_REQUESTS {
        let chain = format!("10.0.0.{i}, 198.51.100.9");
        test::call_service(&app, ask_via("192.0.2.1", &chain, &chess())).await;
    }

    let resp = test::call_service(&app, ask_via("192.0.2.1", "10.0.0.200, 198.51.100.9", &chess())).await;
    assert_eq!(resp.status().as_u16(), 429);
}
