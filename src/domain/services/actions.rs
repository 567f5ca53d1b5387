#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::ChatGateway;
use crate::domain::models::ChatGatewayArc;
use crate::domain::models::Event;

/// A blank message or a signed-out session never reaches the network. A
/// successful send asks the poller for one immediate refresh; a failed send
/// surfaces the error and leaves the input untouched for a retry.
async fn submit_message(
    gateway: &ChatGatewayArc,
    token: Option<&str>,
    content: &str,
    refresh: &mpsc::UnboundedSender<()>,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let token = match token {
        Some(token) if !token.is_empty() => token,
        _ => return Ok(()),
    };

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    match gateway.send_message(token, trimmed).await {
        Ok(_) => {
            tx.send(Event::MessageSent())?;
            let _ = refresh.send(());
        }
        Err(err) => {
            tracing::warn!(error = ?err, "failed to send message");
            tx.send(Event::ChatError(err.to_string()))?;
        }
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        gateway: ChatGatewayArc,
        token: Option<String>,
        refresh: mpsc::UnboundedSender<()>,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        loop {
            let action = rx.recv().await;
            if action.is_none() {
                return Ok(());
            }

            match action.unwrap() {
                Action::SubmitMessage(content) => {
                    submit_message(&gateway, token.as_deref(), &content, &refresh, &tx).await?;
                }
            }
        }
    }
}
