use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ChatMessage;
use super::Member;

/// The canonical sign-in payload. The server is expected to answer with
/// exactly `{token, member}`; anything else is a parsing error rather than
/// something to guess around.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub member: Member,
}

/// Partial profile update. Fields left as `None` are omitted from the
/// request body and stay untouched on the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        return self.username.is_none() && self.password.is_none();
    }
}

/// Remote operations around members and their sessions. Every call is a
/// single request/response round trip with no local retry; authenticated
/// calls receive the stored token from the caller.
#[async_trait]
pub trait AuthGateway {
    async fn register(&self, username: &str, password: &str) -> Result<Member>;

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse>;

    async fn fetch_current_user(&self, token: &str) -> Result<Member>;

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<Member>;
}

/// Remote operations around the group chat log.
#[async_trait]
pub trait ChatGateway {
    /// Fetches the message list. Implementations normalize the response
    /// shape; a response that carries no recognizable list yields an empty
    /// one instead of an error.
    async fn fetch_messages(&self, token: &str) -> Result<Vec<ChatMessage>>;

    async fn send_message(&self, token: &str, content: &str) -> Result<ChatMessage>;
}

pub type AuthGatewayBox = Box<dyn AuthGateway + Send + Sync>;
pub type ChatGatewayArc = Arc<dyn ChatGateway + Send + Sync>;
