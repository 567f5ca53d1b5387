#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Member;
use crate::domain::models::PersistedSession;

/// The only contract the session controller has with persistence. Disk is
/// the real implementation; tests inject an in-memory one.
#[async_trait]
pub trait SessionStore {
    async fn load(&self) -> Result<Option<PersistedSession>>;

    async fn save(&self, session: &PersistedSession) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}

pub type SessionStoreBox = Box<dyn SessionStore + Send + Sync>;

/// Persists the token as a plain string and the profile as JSON, each in its
/// own file under the state directory. Both files are removed together on
/// sign-out or invalidation.
pub struct DiskSessionStore {
    pub state_dir: path::PathBuf,
}

impl Default for DiskSessionStore {
    fn default() -> DiskSessionStore {
        return DiskSessionStore::new(path::PathBuf::from(Config::get(ConfigKey::StateDir)));
    }
}

impl DiskSessionStore {
    pub fn new(state_dir: path::PathBuf) -> DiskSessionStore {
        return DiskSessionStore { state_dir };
    }

    fn token_path(&self) -> path::PathBuf {
        return self.state_dir.join("token");
    }

    fn member_path(&self) -> path::PathBuf {
        return self.state_dir.join("member.json");
    }
}

#[async_trait]
impl SessionStore for DiskSessionStore {
    async fn load(&self) -> Result<Option<PersistedSession>> {
        let token_path = self.token_path();
        if !token_path.exists() {
            return Ok(None);
        }

        let token = fs::read_to_string(token_path).await?.trim().to_string();
        if token.is_empty() {
            return Ok(None);
        }

        let mut member: Option<Member> = None;
        let member_path = self.member_path();
        if member_path.exists() {
            let payload = fs::read_to_string(member_path).await?;
            match serde_json::from_str::<Member>(&payload) {
                Ok(parsed) => member = Some(parsed),
                Err(err) => {
                    tracing::warn!(error = ?err, "stored profile is unreadable, dropping it");
                }
            }
        }

        return Ok(Some(PersistedSession { token, member }));
    }

    async fn save(&self, session: &PersistedSession) -> Result<()> {
        if !self.state_dir.exists() {
            fs::create_dir_all(&self.state_dir).await?;
        }

        let mut token_file = fs::File::create(self.token_path()).await?;
        token_file.write_all(session.token.as_bytes()).await?;

        match &session.member {
            Some(member) => {
                let payload = serde_json::to_string(member)?;
                let mut member_file = fs::File::create(self.member_path()).await?;
                member_file.write_all(payload.as_bytes()).await?;
            }
            None => {
                let member_path = self.member_path();
                if member_path.exists() {
                    fs::remove_file(member_path).await?;
                }
            }
        }

        return Ok(());
    }

    async fn clear(&self) -> Result<()> {
        for file_path in [self.token_path(), self.member_path()] {
            if file_path.exists() {
                fs::remove_file(file_path).await?;
            }
        }

        return Ok(());
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    state: std::sync::Arc<std::sync::Mutex<Option<PersistedSession>>>,
}

#[cfg(test)]
impl MemorySessionStore {
    pub fn snapshot(&self) -> Option<PersistedSession> {
        return self.state.lock().unwrap().clone();
    }
}

#[cfg(test)]
#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<PersistedSession>> {
        return Ok(self.state.lock().unwrap().clone());
    }

    async fn save(&self, session: &PersistedSession) -> Result<()> {
        *self.state.lock().unwrap() = Some(session.clone());
        return Ok(());
    }

    async fn clear(&self) -> Result<()> {
        *self.state.lock().unwrap() = None;
        return Ok(());
    }
}
