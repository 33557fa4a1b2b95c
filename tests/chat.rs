mod common;

use axum::http::StatusCode;
use common::*;
use dev_dashboard::llm::{compose_prompt, ChatModel, DEFAULT_MODEL};
use serde_json::json;
use std::time::Duration;

#[test]
fn test_prompt_without_context_is_verbatim() {
    assert_eq!(compose_prompt("What is polars?", None), "What is polars?");
    assert_eq!(compose_prompt("What is polars?", Some("")), "What is polars?");
}

#[test]
fn test_prompt_with_context() {
    assert_eq!(
        compose_prompt("How do I join?", Some("df.join(other, on=\"id\")")),
        "Context:\ndf.join(other, on=\"id\")\n\nQuestion:\nHow do I join?\n\nAnswer:"
    );
}

#[tokio::test]
async fn test_chat_model_calls_generate() {
    let ollama = StubUpstream::ok(json!({ "model": DEFAULT_MODEL, "response": "Use join().", "done": true })).await;
    let model = ChatModel::new(ollama.base.clone(), DEFAULT_MODEL, Duration::from_secs(5)).unwrap();
    assert_eq!(model.model(), "gemma3:1b");

    let answer = model.chat("How do I join?", Some("docs")).await.unwrap();

    assert_eq!(answer, "Use join().");
    let requests = ollama.requests();
    assert_eq!(requests[0].path, "/api/generate");
    assert_eq!(
        requests[0].body,
        json!({
            "model": "gemma3:1b",
            "prompt": "Context:\ndocs\n\nQuestion:\nHow do I join?\n\nAnswer:",
            "stream": false
        })
    );
}

#[tokio::test]
async fn test_chat_endpoint() {
    let ollama = StubUpstream::ok(json!({ "response": "Hello!" })).await;
    let mut config = test_config(&unreachable(), &unreachable());
    config.ollama_url = ollama.base.clone();

    let (status, body) = post_json(app(&config, None), "/api/llm/chat", json!({ "prompt": "Hi" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "response": "Hello!" }));
    assert_eq!(ollama.requests()[0].body["prompt"], "Hi");
}

#[tokio::test]
async fn test_chat_endpoint_upstream_failure_is_500() {
    let ollama = StubUpstream::start(StatusCode::NOT_FOUND, json!({ "error": "model not found" }))
        .await
        .unwrap();
    let mut config = test_config(&unreachable(), &unreachable());
    config.ollama_url = ollama.base.clone();

    let (status, body) = post_json(app(&config, None), "/api/llm/chat", json!({ "prompt": "Hi" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Ollama API error"));
}

#[tokio::test]
async fn test_chat_endpoint_unreachable_model_is_500() {
    let mut config = test_config(&unreachable(), &unreachable());
    config.ollama_url = url::Url::parse("http://127.0.0.1:1/").unwrap();

    let (status, body) = post_json(app(&config, None), "/api/llm/chat", json!({ "prompt": "Hi", "context": "x" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().is_empty());
}
