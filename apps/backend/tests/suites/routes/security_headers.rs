// Security headers and request ids on every response.

use actix_web::test;
use serde_json::json;

use crate::support::app_builder::{ask, fallback_only_state, get, init_app};

const ALWAYS: [(&str, &str); 4] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none'"),
];

#[actix_web::test]
async fn ask_ai_responses_carry_security_headers_and_no_store() {
    let app = init_app(fallback_only_state()).await;

    let resp = test::call_service(&app, ask(&json!({"board": "fen", "possibleMoves": ["e4"]}))).await;
    let headers = resp.headers();

    for (name, value) in ALWAYS {
        assert_eq!(headers.get(name).unwrap(), value, "{name}");
    }
    assert_eq!(headers.get("cache-control").unwrap(), "no-store");
}

#[actix_web::test]
async fn error_responses_carry_security_headers() {
    let app = init_app(fallback_only_state()).await;

    let resp = test::call_service(&app, ask(&json!({"foo": 1}))).await;
    assert_eq!(resp.status().as_u16(), 400);

    for (name, value) in ALWAYS {
        assert_eq!(resp.headers().get(name).unwrap(), value, "{name}");
    }
}

#[actix_web::test]
async fn root_is_cacheable() {
    let app = init_app(fallback_only_state()).await;

    let resp = test::call_service(&app, get("/")).await;

    assert!(resp.headers().get("cache-control").is_none());
    assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");
}

#[actix_web::test]
async fn every_response_has_a_uuid_request_id() {
    let app = init_app(fallback_only_state()).await;

    let resp = test::call_service(&app, get("/health")).await;
    let id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header");

    assert!(uuid::Uuid::parse_str(id).is_ok(), "not a uuid: {id}");
}

#[actix_web::test]
async fn error_trace_id_matches_request_id() {
    let app = init_app(fallback_only_state()).await;

    let resp = test::call_service(&app, ask(&json!({"foo": 1}))).await;
    let request_id = resp.headers().get("x-request-id").cloned().expect("x-request-id");
    let trace_id = resp.headers().get("x-trace-id").cloned().expect("x-trace-id");

    assert_eq!(request_id, trace_id);
}
