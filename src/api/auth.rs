use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::envelope::{failure_message, unwrap_envelope};
use super::{endpoint, LOGIN_PATH, REFRESH_PATH, REFRESH_TOKEN_HEADER};
use crate::models::{Credentials, TokenPair};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Remote principal operations used by the session controller
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, AuthError>;

    /// Exchange the current pair for a new access token. The refresh token
    /// is not rotated.
    async fn refresh(&self, access_token: &str, refresh_token: &str) -> Result<String, AuthError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    access_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
}

/// reqwest implementation of [`AuthApi`]
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    http: reqwest::Client,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Read a 2xx JSON body or turn the response into an `AuthError::Status`
    async fn read_body(response: reqwest::Response) -> Result<serde_json::Value, AuthError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::Status {
                status: status.as_u16(),
                message: failure_message(status, &text),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, AuthError> {
        let url = endpoint(&self.base_url, LOGIN_PATH);
        debug!(username = %credentials.username, "Submitting admin login");

        let response = self.http.post(&url).json(credentials).send().await?;
        let body = Self::read_body(response).await?;
        Ok(unwrap_envelope(body)?)
    }

    async fn refresh(&self, access_token: &str, refresh_token: &str) -> Result<String, AuthError> {
        let url = endpoint(&self.base_url, REFRESH_PATH);
        debug!("Refreshing access token");

        let response = self
            .http
            .post(&url)
            .header(REFRESH_TOKEN_HEADER, refresh_token)
            .json(&RefreshRequest { access_token })
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        let refreshed: RefreshResponse = unwrap_envelope(body)?;
        Ok(refreshed.access_token)
    }
}
