pub mod chat;
pub mod members;

use std::sync::Arc;

use anyhow::anyhow;
use anyhow::Error;
use serde_derive::Deserialize;

use crate::domain::models::AuthGatewayBox;
use crate::domain::models::ChatGatewayArc;

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Turns a non-success response into an error carrying the server's `detail`
/// message when the body has one, else the given fallback.
pub(crate) async fn response_error(res: reqwest::Response, fallback: &str) -> Error {
    let status = res.status().as_u16();
    let payload = res.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&payload)
        .ok()
        .and_then(|body| return body.detail);

    tracing::error!(status = status, body = payload.as_str(), "request failed");

    return match detail {
        Some(detail) => anyhow!(detail),
        None => anyhow!(fallback.to_string()),
    };
}

pub struct ApiManager {}

impl ApiManager {
    pub fn members() -> AuthGatewayBox {
        return Box::<members::MembersClient>::default();
    }

    pub fn chat() -> ChatGatewayArc {
        return Arc::new(chat::ChatClient::default());
    }
}
