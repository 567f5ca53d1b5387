#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use serde_derive::Deserialize;
use serde_derive::Serialize;

/// One entry of the group chat log. Messages are read-only on the client;
/// the list is rendered in whatever order the server returns it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub member: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ChatMessage {
    pub fn author(&self) -> &str {
        if self.member.is_empty() {
            return "unknown member";
        }

        return &self.member;
    }

    pub fn timestamp_display(&self) -> String {
        if let Some(created_at) = &self.created_at {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(created_at) {
                return parsed.format("%H:%M").to_string();
            }
        }

        return "".to_string();
    }
}
