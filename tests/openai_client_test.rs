//! Integration tests for the chat-completions client with a mocked endpoint.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use supercoder::error::OpenAiError;
use supercoder::openai::{CodeModel, OpenAiClient};

/// Helper to create a client pointing at a mock server.
fn mock_client(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(
        "gpt-4o-mini".to_string(),
        "sk-test".to_string(),
        Some(server.uri()),
    )
    .expect("Failed to build client")
}

/// A minimal successful chat-completions body.
fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

#[tokio::test]
async fn test_complete_returns_first_choice_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "@@D\nprint('hello')\n@@D",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let response = client.complete("system", "user").await.unwrap();

    assert_eq!(response, "@@D\nprint('hello')\n@@D");
}

#[tokio::test]
async fn test_complete_sends_bearer_auth_and_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "messages": [
                { "role": "system", "content": "be a python developer" },
                { "role": "user", "content": "write me a program" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    client
        .complete("be a python developer", "write me a program")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "code": "invalid_api_key" }
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.complete("system", "user").await.unwrap_err();

    assert!(matches!(err, OpenAiError::AuthFailed));
}

#[tokio::test]
async fn test_server_error_maps_to_bad_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.complete("system", "user").await.unwrap_err();

    match err {
        OpenAiError::BadStatus { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("upstream exploded"));
        }
        other => panic!("expected BadStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_body_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached", "code": "rate_limit_exceeded" }
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.complete("system", "user").await.unwrap_err();

    match err {
        OpenAiError::BadStatus { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("Rate limit reached"));
        }
        other => panic!("expected BadStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.complete("system", "user").await.unwrap_err();

    assert!(matches!(err, OpenAiError::EmptyResponse));
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.complete("system", "user").await.unwrap_err();

    assert!(matches!(err, OpenAiError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_null_content_becomes_empty_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": null } }
            ]
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let response = client.complete("system", "user").await.unwrap();

    assert_eq!(response, "");
}
