use actix_web::test;
use gateway::ai::UpstreamError;
use serde_json::{json, Value};

use crate::support::app_builder::{ask, fallback_only_state, get, init_app, state_with};
use crate::support::scripted_client::ScriptedClient;

#[actix_web::test]
async fn health_reports_fallback_only_mode() {
    let app = init_app(fallback_only_state()).await;

    let resp = test::call_service(&app, get("/health")).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["upstream"], "fallback_only");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["time"].as_str().is_some_and(|t| t.contains('T')));
    assert_eq!(body["recent"], json!({"total": 0, "model": 0, "fallback": 0, "failed": 0}));
}

#[actix_web::test]
async fn health_summarizes_recent_outcomes() {
    let client = ScriptedClient::replying("e4");
    client.push(Err(UpstreamError::Timeout));
    let app = init_app(state_with(client)).await;

    let chess = json!({"board": "fen", "possibleMoves": ["e4", "d4"]});
    // First call times out and falls back, second is answered by the model.
    test::call_service(&app, ask(&chess)).await;
    test::call_service(&app, ask(&chess)).await;
    // No history: rejected before any adapter work.
    test::call_service(&app, ask(&json!({"history": []}))).await;

    let resp = test::call_service(&app, get("/health")).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["upstream"], "configured");
    assert_eq!(body["recent"], json!({"total": 3, "model": 1, "fallback": 1, "failed": 1}));
}

#[actix_web::test]
async fn root_serves_plain_text_banner() {
    let app = init_app(fallback_only_state()).await;

    let resp = test::call_service(&app, get("/")).await;
    assert_eq!(resp.status().as_u16(), 200);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("/api/ask-ai"));
}
