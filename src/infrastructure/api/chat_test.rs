use anyhow::Result;
use mockito::Matcher;
use serde_json::json;

use super::normalize_messages;
use super::ChatClient;
use crate::domain::models::ChatGateway;

#[test]
fn it_keeps_a_bare_array_in_order() {
    let payload = json!([
        {"id": 1, "member": "alice", "content": "first"},
        {"id": 2, "member": "bob", "content": "second"},
    ]);

    let messages = normalize_messages(payload);

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "first");
    assert_eq!(messages[1].content, "second");
}

#[test]
fn it_unwraps_a_results_envelope() {
    let payload = json!({
        "results": [{"id": 1, "member": "alice", "content": "first"}],
    });

    let messages = normalize_messages(payload);

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].member, "alice");
}

#[test]
fn it_returns_an_empty_list_for_anything_else() {
    assert!(normalize_messages(json!(null)).is_empty());
    assert!(normalize_messages(json!({})).is_empty());
    assert!(normalize_messages(json!({"results": "nope"})).is_empty());
    assert!(normalize_messages(json!(42)).is_empty());
}

#[test]
fn it_skips_entries_that_are_not_objects() {
    let payload = json!([
        {"id": 1, "member": "alice", "content": "first"},
        42,
        {"id": 2, "member": "bob", "content": "second"},
    ]);

    let messages = normalize_messages(payload);

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content, "second");
}

#[tokio::test]
async fn it_fetches_messages_with_the_token() -> Result<()> {
    let body = json!([
        {"id": 1, "member": "alice", "content": "hello", "created_at": "2024-05-01T09:30:00Z"},
    ])
    .to_string();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/chat/messages/")
        .match_header("Authorization", "Bearer abc123")
        .with_status(200)
        .with_body(body)
        .create();

    let client = ChatClient::new(&server.url());
    let messages = client.fetch_messages("abc123").await?;

    mock.assert();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].member, "alice");

    return Ok(());
}

#[tokio::test]
async fn it_sends_a_message() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat/messages/")
        .match_header("Authorization", "Bearer abc123")
        .match_body(Matcher::JsonString(r#"{"content": "hello"}"#.to_string()))
        .with_status(201)
        .with_body(
            json!({"id": 7, "member": "alice", "content": "hello", "created_at": "2024-05-01T09:30:00Z"})
                .to_string(),
        )
        .create();

    let client = ChatClient::new(&server.url());
    let message = client.send_message("abc123", "hello").await?;

    mock.assert();
    assert_eq!(message.id, Some(7));
    assert_eq!(message.content, "hello");

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_send_failures_with_the_detail_message() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat/messages/")
        .with_status(400)
        .with_body(r#"{"detail": "The message cannot be empty."}"#)
        .create();

    let client = ChatClient::new(&server.url());
    let err = client.send_message("abc123", "hello").await.unwrap_err();

    mock.assert();
    assert_eq!(err.to_string(), "The message cannot be empty.");
}
