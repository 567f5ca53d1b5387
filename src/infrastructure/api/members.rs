#[cfg(test)]
#[path = "members_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::response_error;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthGateway;
use crate::domain::models::LoginResponse;
use crate::domain::models::Member;
use crate::domain::models::ProfileUpdate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CredentialsRequest {
    username: String,
    password: String,
}

pub struct MembersClient {
    url: String,
}

impl Default for MembersClient {
    fn default() -> MembersClient {
        return MembersClient::new(&Config::get(ConfigKey::ServerURL));
    }
}

impl MembersClient {
    pub fn new(url: &str) -> MembersClient {
        return MembersClient {
            url: url.to_string(),
        };
    }
}

#[async_trait]
impl AuthGateway for MembersClient {
    async fn register(&self, username: &str, password: &str) -> Result<Member> {
        let req = CredentialsRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/members/register/", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(response_error(res, "Could not register. Try again.").await);
        }

        return Ok(res.json::<Member>().await?);
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let req = CredentialsRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/members/login/", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(response_error(res, "Could not sign in. Check your credentials.").await);
        }

        return Ok(res.json::<LoginResponse>().await?);
    }

    async fn fetch_current_user(&self, token: &str) -> Result<Member> {
        let res = reqwest::Client::new()
            .get(format!("{url}/api/members/me/", url = self.url))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(response_error(res, "Could not load your profile.").await);
        }

        return Ok(res.json::<Member>().await?);
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<Member> {
        let res = reqwest::Client::new()
            .put(format!("{url}/api/members/me/", url = self.url))
            .header("Authorization", format!("Bearer {token}"))
            .json(update)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(response_error(res, "Could not update your profile.").await);
        }

        return Ok(res.json::<Member>().await?);
    }
}
