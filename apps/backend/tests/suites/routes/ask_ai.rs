// End-to-end behaviour of POST /api/ask-ai for each game protocol.

use actix_web::test;
use gateway::ai::fallback::word_list;
use gateway::ai::types::{Difficulty, Role};
use gateway::ai::UpstreamError;
use serde_json::{json, Value};

use crate::common::assert_error_shape;
use crate::support::app_builder::{ask, fallback_only_state, init_app, state_with};
use crate::support::scripted_client::ScriptedClient;

fn dots_body() -> Value {
    json!({
        "game": "dots-and-boxes",
        "state": {"hLines": [[true]], "vLines": [[false]], "boxes": [[{"owner": null}]]},
        "player": 1
    })
}

#[actix_web::test]
async fn chat_without_upstream_is_500() {
    let app = init_app(fallback_only_state()).await;

    let resp = test::call_service(&app, ask(&json!({"history": [{"role": "user", "content": "hi"}]}))).await;

    assert_error_shape(resp, 500, "CHAT_UNAVAILABLE").await;
}

#[actix_web::test]
async fn chat_with_failing_upstream_is_500() {
    let client = ScriptedClient::failing(UpstreamError::Status(503));
    let app = init_app(state_with(client.clone())).await;

    let resp = test::call_service(&app, ask(&json!({"history": [{"role": "user", "content": "hi"}]}))).await;

    assert_error_shape(resp, 500, "CHAT_UNAVAILABLE").await;
    assert_eq!(client.calls(), 1, "exactly one upstream attempt");
}

#[actix_web::test]
async fn chat_reply_is_passed_through_trimmed() {
    let client = ScriptedClient::replying("  Hello there!  \n");
    let app = init_app(state_with(client.clone())).await;
    let history = json!([
        {"role": "system", "content": "You are a friendly helper."},
        {"role": "user", "content": "hi"}
    ]);

    let resp = test::call_service(&app, ask(&json!({"history": history}))).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Hello there!"}));

    let (messages, tuning) = client.last_call().expect("upstream called");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(tuning.max_tokens, 300);
}

#[actix_web::test]
async fn fenced_bare_move_is_matched_exactly() {
    let client = ScriptedClient::replying("```json\na2-a3\n```");
    let app = init_app(state_with(client.clone())).await;
    let body = json!({"board": ["r", "n", "b"], "possibleMoves": ["a2-a3", "b2-b3"]});

    let resp = test::call_service(&app, ask(&body)).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"move": "a2-a3"}));

    let (messages, tuning) = client.last_call().expect("upstream called");
    assert!(messages[1].content.contains("a2-a3"), "legal moves are in the prompt");
    assert!((tuning.temperature - 0.2).abs() < f32::EPSILON);
}

#[actix_web::test]
async fn checkers_wrapper_is_accepted() {
    let client = ScriptedClient::replying(r#"{"move": {"from": [5, 0], "to": [4, 1]}}"#);
    let app = init_app(state_with(client)).await;
    let body = json!({
        "checkers": {
            "board": [[null, "b"], ["r", null]],
            "possibleMoves": [{"from": [5, 0], "to": [4, 1]}, {"from": [5, 2], "to": [4, 3]}]
        }
    });

    let resp = test::call_service(&app, ask(&body)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"move": {"from": [5, 0], "to": [4, 1]}}));
}

#[actix_web::test]
async fn chess_illegal_answer_falls_back_with_error_note() {
    let client = ScriptedClient::replying("Qxh7#");
    let app = init_app(state_with(client)).await;
    let moves = ["e2e4", "d2d4", "g1f3"];
    let body = json!({"board": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "possibleMoves": moves});

    let resp = test::call_service(&app, ask(&body)).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;

    let mv = body["move"].as_str().expect("move is a string");
    assert!(moves.contains(&mv), "fallback picks from possibleMoves, got {mv}");
    assert!(body["error"].as_str().is_some_and(|e| e.contains("used fallback")));
}

#[actix_web::test]
async fn dots_with_upstream_down_takes_first_open_vertical_line() {
    let client = ScriptedClient::failing(UpstreamError::Timeout);
    let app = init_app(state_with(client)).await;

    let resp = test::call_service(&app, ask(&dots_body())).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["move"], json!({"row": 0, "col": 0, "orientation": "v"}));
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn dots_model_move_on_drawn_line_is_rejected() {
    let client = ScriptedClient::replying(r#"{"row": 0, "col": 0, "orientation": "h"}"#);
    let app = init_app(state_with(client)).await;

    let resp = test::call_service(&app, ask(&dots_body())).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["move"], json!({"row": 0, "col": 0, "orientation": "v"}));
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn dots_full_board_is_422() {
    let client = ScriptedClient::replying("{}");
    let app = init_app(state_with(client.clone())).await;
    let body = json!({
        "game": "dots-and-boxes",
        "state": {"hLines": [[true]], "vLines": [[true]], "boxes": [[{"owner": 1}]]},
        "player": 2
    });

    let resp = test::call_service(&app, ask(&body)).await;

    assert_error_shape(resp, 422, "NO_LEGAL_MOVES").await;
    assert_eq!(client.calls(), 0);
}

#[actix_web::test]
async fn dots_missing_state_grid_is_400() {
    let app = init_app(fallback_only_state()).await;
    let body = json!({"game": "dots-and-boxes", "state": {"hLines": [[false]]}, "player": 1});

    let resp = test::call_service(&app, ask(&body)).await;

    assert_error_shape(resp, 400, "INVALID_REQUEST").await;
}

#[actix_web::test]
async fn word_with_space_falls_back_to_easy_list() {
    let client = ScriptedClient::replying("cat dog");
    let app = init_app(state_with(client)).await;
    let body = json!({"game": "word-guess-generator", "difficulty": "easy", "systemPrompt": "Pick a word."});

    let resp = test::call_service(&app, ask(&body)).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;

    let word = body["word"].as_str().expect("word is a string");
    assert!(word_list(Difficulty::Easy).contains(&word));
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn word_answer_is_accepted() {
    let client = ScriptedClient::replying(r#"{"word": "planet"}"#);
    let app = init_app(state_with(client)).await;
    let body = json!({"game": "word-guess-generator", "difficulty": "Medium", "systemPrompt": "Pick a word."});

    let resp = test::call_service(&app, ask(&body)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"word": "planet"}));
}

#[actix_web::test]
async fn unknown_difficulty_is_400() {
    let app = init_app(fallback_only_state()).await;
    let body = json!({"game": "word-guess-generator", "difficulty": "impossible", "systemPrompt": "x"});

    let resp = test::call_service(&app, ask(&body)).await;

    assert_error_shape(resp, 400, "INVALID_REQUEST").await;
}

#[actix_web::test]
async fn trivia_batch_from_model_is_returned() {
    let questions: Vec<Value> = (0..5)
        .map(|i| json!({"question": format!("Question {i}?"), "options": ["a", "b", "c", "d"], "correct": i % 4}))
        .collect();
    let client = ScriptedClient::replying(&format!("```json\n{}\n```", json!({"questions": questions})));
    let app = init_app(state_with(client)).await;
    let body = json!({"game": "trivia-generator", "difficulty": "hard", "systemPrompt": "Space facts."});

    let resp = test::call_service(&app, ask(&body)).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["questions"], Value::Array(questions));
    assert!(body.get("error").is_none());
}

#[actix_web::test]
async fn fallback_only_mode_never_fails_move_games() {
    let app = init_app(fallback_only_state()).await;

    let resp = test::call_service(&app, ask(&json!({"board": "fen", "possibleMoves": ["e4"]}))).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["move"], "e4");
    assert_eq!(body["error"], "AI service not configured; used fallback");
}

#[actix_web::test]
async fn empty_possible_moves_is_422() {
    let client = ScriptedClient::replying("e4");
    let app = init_app(state_with(client.clone())).await;

    let resp = test::call_service(&app, ask(&json!({"board": [], "possibleMoves": []}))).await;

    assert_error_shape(resp, 422, "NO_LEGAL_MOVES").await;
    assert_eq!(client.calls(), 0);
}
