#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use super::response_error;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatGateway;
use crate::domain::models::ChatMessage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SendMessageRequest {
    content: String,
}

pub struct ChatClient {
    url: String,
}

impl Default for ChatClient {
    fn default() -> ChatClient {
        return ChatClient::new(&Config::get(ConfigKey::ServerURL));
    }
}

impl ChatClient {
    pub fn new(url: &str) -> ChatClient {
        return ChatClient {
            url: url.to_string(),
        };
    }
}

/// The server answers with either a bare array or a `{"results": [...]}`
/// envelope. Anything else yields an empty list; list entries that are not
/// message objects are skipped.
fn normalize_messages(payload: Value) -> Vec<ChatMessage> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => vec![],
        },
        _ => vec![],
    };

    return items
        .into_iter()
        .filter_map(|item| {
            return match serde_json::from_value::<ChatMessage>(item) {
                Ok(message) => Some(message),
                Err(err) => {
                    tracing::warn!(error = ?err, "skipping malformed message");
                    None
                }
            };
        })
        .collect();
}

#[async_trait]
impl ChatGateway for ChatClient {
    async fn fetch_messages(&self, token: &str) -> Result<Vec<ChatMessage>> {
        let res = reqwest::Client::new()
            .get(format!("{url}/api/chat/messages/", url = self.url))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(response_error(res, "Could not load messages.").await);
        }

        let payload = res.json::<Value>().await?;
        return Ok(normalize_messages(payload));
    }

    async fn send_message(&self, token: &str, content: &str) -> Result<ChatMessage> {
        let req = SendMessageRequest {
            content: content.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/chat/messages/", url = self.url))
            .header("Authorization", format!("Bearer {token}"))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(response_error(res, "Could not send the message.").await);
        }

        return Ok(res.json::<ChatMessage>().await?);
    }
}
