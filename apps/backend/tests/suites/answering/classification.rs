// Precedence of the shape rules, observed through the gateway.

use std::sync::Arc;

use gateway::ai::events::RecentEvents;
use gateway::ai::{AdapterKind, CompletionClient, Gateway, MovePicker, Outcome};
use gateway::GatewayError;
use serde_json::json;

use crate::support::scripted_client::ScriptedClient;

fn gateway_with(client: Arc<ScriptedClient>) -> (Gateway, Arc<RecentEvents>) {
    let events = Arc::new(RecentEvents::new());
    let gateway = Gateway::new(Some(client as Arc<dyn CompletionClient>), MovePicker::new(Some(1)), events.clone());
    (gateway, events)
}

#[tokio::test]
async fn checkers_wrapper_wins_over_trivia_discriminator() {
    let client = ScriptedClient::replying("a2-a3");
    let (gw, events) = gateway_with(client.clone());
    let body = json!({
        "game": "trivia-generator",
        "difficulty": "easy",
        "systemPrompt": "trivia please",
        "checkers": {"board": [["r"]], "possibleMoves": ["a2-a3"]}
    });

    let response = gw.ask(body).await.expect("answered");

    assert_eq!(serde_json::to_value(&response).unwrap(), json!({"move": "a2-a3"}));
    let recorded = events.snapshot();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].adapter, AdapterKind::Checkers);
    assert_eq!(recorded[0].outcome, Outcome::Model);

    let (_, tuning) = client.last_call().expect("upstream called");
    assert_eq!(tuning.max_tokens, 32);
}

#[tokio::test]
async fn dots_beats_history_when_both_present() {
    let client = ScriptedClient::replying(r#"{"row": 0, "col": 0, "orientation": "h"}"#);
    let (gw, events) = gateway_with(client);
    let body = json!({
        "game": "dots-and-boxes",
        "state": {"hLines": [[false]], "vLines": [[false]], "boxes": [[{"owner": null}]]},
        "player": 2,
        "history": [{"role": "user", "content": "hi"}]
    });

    gw.ask(body).await.expect("answered");

    assert_eq!(events.snapshot()[0].adapter, AdapterKind::DotsAndBoxes);
}

#[tokio::test]
async fn generator_without_system_prompt_is_unrecognized() {
    let client = ScriptedClient::replying("unused");
    let (gw, _) = gateway_with(client.clone());

    let err = gw
        .ask(json!({"game": "word-guess-generator", "difficulty": "easy"}))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GatewayError::unrecognized(vec!["difficulty".into(), "game".into()])
    );
    assert_eq!(client.calls(), 0);
}
