#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use super::session_store::SessionStoreBox;
use crate::domain::models::AuthGateway;
use crate::domain::models::Member;
use crate::domain::models::PersistedSession;
use crate::domain::models::Session;

/// Owns the in-memory session and keeps it in lockstep with the store.
/// Startup validation is the one place remote errors are absorbed: a stored
/// token that the server rejects tears the whole session down silently.
pub struct SessionService {
    session: Session,
    store: SessionStoreBox,
}

impl SessionService {
    pub fn new(store: SessionStoreBox) -> SessionService {
        return SessionService {
            session: Session {
                token: None,
                member: None,
                is_loading: true,
            },
            store,
        };
    }

    pub fn session(&self) -> &Session {
        return &self.session;
    }

    /// Restores the persisted session, shows the cached profile
    /// optimistically, and validates the token against the server. Any
    /// validation failure clears both memory and store so a stale token
    /// never survives a restart.
    pub async fn initialize(&mut self, gateway: &dyn AuthGateway) -> Result<()> {
        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(error = ?err, "session store is unreadable, starting signed out");
                None
            }
        };

        if let Some(persisted) = stored {
            self.session.token = Some(persisted.token.clone());
            self.session.member = persisted.member.clone();

            match gateway.fetch_current_user(&persisted.token).await {
                Ok(member) => {
                    self.session.member = Some(member.clone());
                    self.store
                        .save(&PersistedSession {
                            token: persisted.token,
                            member: Some(member),
                        })
                        .await?;
                }
                Err(err) => {
                    tracing::warn!(error = ?err, "stored token failed validation, signing out");
                    self.session.token = None;
                    self.session.member = None;
                    self.store.clear().await?;
                }
            }
        }

        self.session.is_loading = false;
        return Ok(());
    }

    pub async fn login(&mut self, token: String, member: Member) -> Result<()> {
        self.session.token = Some(token.clone());
        self.session.member = Some(member.clone());
        self.store
            .save(&PersistedSession {
                token,
                member: Some(member),
            })
            .await?;

        return Ok(());
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.session.token = None;
        self.session.member = None;
        self.store.clear().await?;

        return Ok(());
    }

    /// Replaces the profile wholesale, leaving the token untouched.
    pub async fn update_profile(&mut self, member: Member) -> Result<()> {
        let token = match &self.session.token {
            Some(token) => token.clone(),
            None => bail!("Cannot update a profile while signed out"),
        };

        self.session.member = Some(member.clone());
        self.store
            .save(&PersistedSession {
                token,
                member: Some(member),
            })
            .await?;

        return Ok(());
    }
}
