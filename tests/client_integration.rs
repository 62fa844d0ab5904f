//! Chat client and suggestion flow against a local stub server

mod common;

use common::{ollama_reply, serve_once};
use llmsh::core::error::LlmshError;
use llmsh::llm::{suggest_commands, ChatClient, DebugTrace};
use std::time::Duration;

fn client(url: &str, token: Option<&str>, timeout: Duration) -> ChatClient {
    ChatClient::new(
        url.into(),
        "llama3".into(),
        token.map(String::from),
        timeout,
    )
    .unwrap()
}

#[tokio::test]
async fn test_ollama_round_trip() {
    let (url, request) = serve_once(
        Some("200 OK"),
        ollama_reply(r#"{"commands": ["ls -la", "pwd"]}"#),
    )
    .await;

    let client = client(&url, Some("secret"), Duration::from_secs(5));
    let content = client.complete("list files").await.unwrap();
    assert_eq!(content.as_deref(), Some(r#"{"commands": ["ls -la", "pwd"]}"#));

    let request = request.await.unwrap();
    assert!(request.starts_with("POST /api/chat "));
    assert!(request
        .to_ascii_lowercase()
        .contains("authorization: bearer secret"));
    assert!(request.contains(r#""stream":false"#));
    assert!(request.contains(r#""model":"llama3""#));
}

#[tokio::test]
async fn test_no_token_no_auth_header() {
    let (url, request) = serve_once(Some("200 OK"), ollama_reply("ls")).await;

    let client = client(&url, None, Duration::from_secs(5));
    client.complete("list files").await.unwrap();

    let request = request.await.unwrap().to_ascii_lowercase();
    assert!(!request.contains("authorization:"));
}

#[tokio::test]
async fn test_openai_shape() {
    let body = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": "1. uptime" } }]
    })
    .to_string();
    let (url, request) = serve_once(Some("200 OK"), body).await;

    let client = client(&format!("{}/v1", url), None, Duration::from_secs(5));
    let content = client.complete("how long has it been up").await.unwrap();
    assert_eq!(content.as_deref(), Some("1. uptime"));

    let request = request.await.unwrap();
    assert!(request.starts_with("POST /v1/chat/completions "));
}

#[tokio::test]
async fn test_missing_content_is_none() {
    let (url, _request) = serve_once(Some("200 OK"), r#"{"done": true}"#.to_string()).await;

    let client = client(&url, None, Duration::from_secs(5));
    assert_eq!(client.complete("anything").await.unwrap(), None);
}

#[tokio::test]
async fn test_http_error_status() {
    let (url, _request) = serve_once(
        Some("500 Internal Server Error"),
        r#"{"error": "model not loaded"}"#.to_string(),
    )
    .await;

    let client = client(&url, None, Duration::from_secs(5));
    let err = client.complete("anything").await.unwrap_err();
    match err {
        LlmshError::Llm(message) => assert!(message.contains("model not loaded")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout() {
    let (url, _request) = serve_once(None, String::new()).await;

    let client = client(&url, None, Duration::from_millis(300));
    let err = client.complete("anything").await.unwrap_err();
    assert!(matches!(err, LlmshError::Timeout(_)));
}

#[tokio::test]
async fn test_suggest_commands_traces_and_extracts() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("trace.log");
    let (url, request) = serve_once(
        Some("200 OK"),
        ollama_reply("```json\n{\"commands\": [\"du -sh *\", \"df -h\"]}\n```"),
    )
    .await;

    let client = client(&url, None, Duration::from_secs(5));
    let trace = DebugTrace::open(&log).unwrap();
    let commands = suggest_commands(&client, &trace, "disk usage", 2).await;

    let commands: Vec<String> = commands.into_iter().map(|c| c.into_string()).collect();
    assert_eq!(commands, vec!["du -sh *", "df -h"]);

    let request = request.await.unwrap();
    assert!(request.contains("Generate 2 shell commands for this task: disk usage"));

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("] Query: disk usage"));
    assert!(contents.contains("Model: llama3"));
    assert!(contents.contains("] Response content:"));
}

#[tokio::test]
async fn test_suggest_commands_maps_failures_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("trace.log");
    let (url, _request) = serve_once(Some("503 Service Unavailable"), String::new()).await;

    let client = client(&url, None, Duration::from_secs(5));
    let trace = DebugTrace::open(&log).unwrap();
    let commands = suggest_commands(&client, &trace, "anything", 5).await;
    assert!(commands.is_empty());

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("] Request error: "));
}

#[tokio::test]
async fn test_suggest_commands_timeout_traced() {
    let (url, _request) = serve_once(None, String::new()).await;

    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("trace.log");
    let client = client(&url, None, Duration::from_millis(300));
    let trace = DebugTrace::open(&log).unwrap();

    assert!(suggest_commands(&client, &trace, "anything", 5).await.is_empty());
    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("] Request timed out"));
}
