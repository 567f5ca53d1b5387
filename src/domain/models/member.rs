use chrono::DateTime;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Map;
use serde_json::Value;

/// The authenticated member as the server reports it. Fields the server adds
/// beyond the known ones are carried along untouched in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Member {
    pub fn new(username: &str) -> Member {
        return Member {
            id: None,
            username: username.to_string(),
            created_at: None,
            extra: Map::new(),
        };
    }

    /// Formats the registration timestamp for display. An absent or
    /// unparseable timestamp renders as an empty string.
    pub fn created_at_display(&self) -> String {
        if let Some(created_at) = &self.created_at {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(created_at) {
                return parsed.format("%Y-%m-%d %H:%M").to_string();
            }
        }

        return "".to_string();
    }
}
