use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::submit_message;
use crate::domain::models::ChatGatewayArc;
use crate::domain::models::Event;
use crate::infrastructure::api::chat::ChatClient;

fn gateway(url: &str) -> ChatGatewayArc {
    return Arc::new(ChatClient::new(url));
}

fn channels() -> (
    mpsc::UnboundedSender<()>,
    mpsc::UnboundedReceiver<()>,
    mpsc::UnboundedSender<Event>,
    mpsc::UnboundedReceiver<Event>,
) {
    let (refresh_tx, refresh_rx) = mpsc::unbounded_channel::<()>();
    let (tx, rx) = mpsc::unbounded_channel::<Event>();
    return (refresh_tx, refresh_rx, tx, rx);
}

#[tokio::test]
async fn it_skips_blank_messages() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/api/chat/messages/").expect(0).create();

    let (refresh_tx, mut refresh_rx, tx, mut rx) = channels();
    submit_message(
        &gateway(&server.url()),
        Some("abc123"),
        "   \t  ",
        &refresh_tx,
        &tx,
    )
    .await?;

    mock.assert();
    assert!(rx.try_recv().is_err());
    assert!(refresh_rx.try_recv().is_err());

    return Ok(());
}

#[tokio::test]
async fn it_skips_sends_while_signed_out() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/api/chat/messages/").expect(0).create();

    let (refresh_tx, _refresh_rx, tx, mut rx) = channels();
    submit_message(&gateway(&server.url()), None, "hello", &refresh_tx, &tx).await?;

    mock.assert();
    assert!(rx.try_recv().is_err());

    return Ok(());
}

#[tokio::test]
async fn it_sends_and_requests_an_immediate_refresh() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat/messages/")
        .match_header("Authorization", "Bearer abc123")
        .match_body(mockito::Matcher::JsonString(
            r#"{"content": "hello"}"#.to_string(),
        ))
        .with_status(201)
        .with_body(
            r#"{"id": 7, "member": "alice", "content": "hello", "created_at": "2024-05-01T09:30:00Z"}"#,
        )
        .create();

    let (refresh_tx, mut refresh_rx, tx, mut rx) = channels();
    // Content is trimmed before it goes over the wire.
    submit_message(
        &gateway(&server.url()),
        Some("abc123"),
        "  hello  ",
        &refresh_tx,
        &tx,
    )
    .await?;

    mock.assert();
    match rx.try_recv() {
        Ok(Event::MessageSent()) => {}
        _ => bail!("Wrong event from recv"),
    }
    assert!(refresh_rx.try_recv().is_ok());

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_send_failures_without_refreshing() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat/messages/")
        .with_status(400)
        .with_body(r#"{"detail": "Message is too long."}"#)
        .create();

    let (refresh_tx, mut refresh_rx, tx, mut rx) = channels();
    submit_message(
        &gateway(&server.url()),
        Some("abc123"),
        "hello",
        &refresh_tx,
        &tx,
    )
    .await?;

    mock.assert();
    match rx.try_recv() {
        Ok(Event::ChatError(message)) => assert_eq!(message, "Message is too long."),
        _ => bail!("Wrong event from recv"),
    }
    assert!(refresh_rx.try_recv().is_err());

    return Ok(());
}
