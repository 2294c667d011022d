//! Otto API endpoint tests using wiremock.
//!
//! These tests verify that OttoClient calls each endpoint with the right
//! method, path, and bearer token, and tolerates the response shapes the
//! backend has shipped.

use otto_probe::client::{OttoClient, OttoError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test token.
fn test_token() -> String {
    "test-auth-token".to_string()
}

fn bearer() -> String {
    format!("Bearer {}", test_token())
}

async fn client_for(server: &MockServer) -> OttoClient {
    OttoClient::with_base_url(server.uri(), test_token())
}

#[tokio::test]
async fn test_health_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("Authorization", bearer()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status":"ok"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    assert!(client.health().await.unwrap());
}

#[tokio::test]
async fn test_health_failure_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    // Non-2xx is reported as unhealthy, not as an error
    assert!(!client.health().await.unwrap());
}

#[tokio::test]
async fn test_start_agent_new_thread() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agent/start"))
        .and(header("Authorization", bearer()))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("prompt=hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "thread_id": "th-1",
            "agent_run_id": "run-1",
            "status": "running"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let response = client.start_agent("hello", None).await.unwrap();

    assert_eq!(response.thread_id, "th-1");
    assert_eq!(response.agent_run_id, "run-1");
    assert_eq!(response.status, "running");
}

#[tokio::test]
async fn test_start_agent_existing_thread_sends_thread_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agent/start"))
        .and(body_string_contains("prompt=again"))
        .and(body_string_contains("thread_id=th-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "thread_id": "th-7",
            "agent_run_id": "run-2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let response = client.start_agent("again", Some("th-7")).await.unwrap();

    assert_eq!(response.thread_id, "th-7");
    assert_eq!(response.agent_run_id, "run-2");
    assert_eq!(response.status, "");
}

#[tokio::test]
async fn test_start_agent_integer_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agent/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "thread_id": 42,
            "agent_run_id": 314
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let response = client.start_agent("hello", None).await.unwrap();

    assert_eq!(response.thread_id, "42");
    assert_eq!(response.agent_run_id, "314");
}

#[tokio::test]
async fn test_start_agent_server_error_carries_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agent/start"))
        .respond_with(ResponseTemplate::new(422).set_body_string("prompt must not be empty"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client.start_agent("", None).await;

    match result {
        Err(OttoError::Server { status, message }) => {
            assert_eq!(status, 422);
            assert!(message.contains("prompt must not be empty"));
        }
        other => panic!("Expected ServerError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_agent_run_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agent-run/run-1"))
        .and(header("Authorization", bearer()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "run-1",
            "status": "completed",
            "error": null,
            "model": "claude-sonnet-4",
            "created_at": "2026-02-01T08:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let run = client.agent_run("run-1").await.unwrap();

    assert_eq!(run.id, "run-1");
    assert_eq!(run.status, "completed");
    assert!(run.error.is_none());
    assert_eq!(run.model.as_deref(), Some("claude-sonnet-4"));
    assert!(run.created_at.is_some());
}

#[tokio::test]
async fn test_agent_run_sparse_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agent-run/run-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "running"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let run = client.agent_run("run-9").await.unwrap();

    assert_eq!(run.status, "running");
    assert!(run.model.is_none());
    assert!(run.created_at.is_none());
}

#[tokio::test]
async fn test_agent_run_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agent-run/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "no such run"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client.agent_run("missing").await;

    match result {
        Err(OttoError::Server { status, .. }) => assert_eq!(status, 404),
        other => panic!("Expected ServerError with status 404, got {:?}", other),
    }
}

#[tokio::test]
async fn test_thread_messages_bare_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/threads/th-1/messages"))
        .and(header("Authorization", bearer()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"type": "user", "content": {"role": "user", "content": "hi"}},
            {"type": "assistant", "content": {"role": "assistant", "content": "hello"}}
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let messages = client.thread_messages("th-1").await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].kind, "user");
    assert_eq!(messages[1].text(), Some("hello"));
}

#[tokio::test]
async fn test_thread_messages_wrapped_shapes_normalize() {
    let raw = serde_json::json!([
        {"type": "user", "content": {"role": "user", "content": "hi"}},
        {"type": "assistant", "content": {"role": "assistant", "content": "hello"}}
    ]);

    for (thread, body) in [
        ("th-messages", serde_json::json!({"messages": raw})),
        ("th-data", serde_json::json!({"data": raw})),
    ] {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/threads/{}/messages", thread)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let messages = client.thread_messages(thread).await.unwrap();

        assert_eq!(messages.len(), 2, "shape for {} did not normalize", thread);
        assert_eq!(messages[0].kind, "user");
        assert_eq!(messages[1].kind, "assistant");
    }
}

#[tokio::test]
async fn test_thread_messages_empty_thread() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/threads/th-empty/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let messages = client.thread_messages("th-empty").await.unwrap();
    assert!(messages.is_empty());
}
