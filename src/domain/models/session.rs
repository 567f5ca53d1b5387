use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Member;

/// The client's belief about whether a member is signed in, and as whom.
/// `member` is only meaningful while `token` is present; both are torn down
/// together when the stored token fails validation.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub token: Option<String>,
    pub member: Option<Member>,
    pub is_loading: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        return self.token.is_some();
    }
}

/// The durable projection of a session: written on every successful sign-in
/// and profile update, removed on sign-out or invalidation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    #[serde(default)]
    pub member: Option<Member>,
}
