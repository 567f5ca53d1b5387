use std::env;

use anyhow::Result;
use uuid::Uuid;

use super::DiskSessionStore;
use super::SessionStore;
use crate::domain::models::Member;
use crate::domain::models::PersistedSession;

fn temp_store() -> DiskSessionStore {
    let state_dir = env::temp_dir().join(format!("samovar-test-{}", Uuid::new_v4()));
    return DiskSessionStore::new(state_dir);
}

#[tokio::test]
async fn it_loads_nothing_from_an_empty_store() -> Result<()> {
    let store = temp_store();
    assert_eq!(store.load().await?, None);
    return Ok(());
}

#[tokio::test]
async fn it_round_trips_a_session() -> Result<()> {
    let store = temp_store();
    let session = PersistedSession {
        token: "abc123".to_string(),
        member: Some(Member::new("alice")),
    };

    store.save(&session).await?;
    assert_eq!(store.load().await?, Some(session));

    return Ok(());
}

#[tokio::test]
async fn it_clears_both_keys_together() -> Result<()> {
    let store = temp_store();
    store
        .save(&PersistedSession {
            token: "abc123".to_string(),
            member: Some(Member::new("alice")),
        })
        .await?;

    store.clear().await?;

    assert_eq!(store.load().await?, None);
    assert!(!store.state_dir.join("token").exists());
    assert!(!store.state_dir.join("member.json").exists());

    return Ok(());
}

#[tokio::test]
async fn it_is_safe_to_clear_an_empty_store() -> Result<()> {
    let store = temp_store();
    store.clear().await?;
    return Ok(());
}

#[tokio::test]
async fn it_keeps_the_token_when_the_profile_is_corrupt() -> Result<()> {
    let store = temp_store();
    store
        .save(&PersistedSession {
            token: "abc123".to_string(),
            member: Some(Member::new("alice")),
        })
        .await?;

    tokio::fs::write(store.state_dir.join("member.json"), "{not json").await?;

    let loaded = store.load().await?.unwrap();
    assert_eq!(loaded.token, "abc123");
    assert_eq!(loaded.member, None);

    return Ok(());
}

#[tokio::test]
async fn it_treats_an_empty_token_file_as_signed_out() -> Result<()> {
    let store = temp_store();
    tokio::fs::create_dir_all(&store.state_dir).await?;
    tokio::fs::write(store.state_dir.join("token"), "  \n").await?;

    assert_eq!(store.load().await?, None);

    return Ok(());
}

#[tokio::test]
async fn it_drops_the_stored_profile_when_saving_without_one() -> Result<()> {
    let store = temp_store();
    store
        .save(&PersistedSession {
            token: "abc123".to_string(),
            member: Some(Member::new("alice")),
        })
        .await?;

    store
        .save(&PersistedSession {
            token: "abc123".to_string(),
            member: None,
        })
        .await?;

    let loaded = store.load().await?.unwrap();
    assert_eq!(loaded.member, None);
    assert!(!store.state_dir.join("member.json").exists());

    return Ok(());
}
