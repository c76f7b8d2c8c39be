use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::envelope::failure_message;
use super::{endpoint, SCAN_PATH};
use crate::models::ScanOutcome;

/// Message used when the backend rejects a scan without saying why
pub const DEFAULT_REJECTION: &str = "Unable to validate ticket";

#[derive(Debug, Error)]
pub enum ScanError {
    /// HTTP 401: the access token was not accepted
    #[error("Access token rejected")]
    Unauthorized,
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 2xx response with `success: false`
    #[error("{0}")]
    Rejected(String),
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Remote QR validation used by the scan flow
#[async_trait]
pub trait ScanApi: Send + Sync {
    async fn scan(&self, payload: &str, access_token: &str) -> Result<ScanOutcome, ScanError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanRequest<'a> {
    encrypted_data: &'a str,
}

/// reqwest implementation of [`ScanApi`]
#[derive(Debug, Clone)]
pub struct ScanClient {
    base_url: String,
    http: reqwest::Client,
}

impl ScanClient {
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

#[async_trait]
impl ScanApi for ScanClient {
    async fn scan(&self, payload: &str, access_token: &str) -> Result<ScanOutcome, ScanError> {
        let url = endpoint(&self.base_url, SCAN_PATH);

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .json(&ScanRequest {
                encrypted_data: payload,
            })
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "Scan response received");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ScanError::Unauthorized);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ScanError::Status {
                status: status.as_u16(),
                message: failure_message(status, &text),
            });
        }

        let bytes = response.bytes().await?;
        let body: serde_json::Value = serde_json::from_slice(&bytes)?;
        if let Some(message) = rejection(&body) {
            return Err(ScanError::Rejected(message));
        }

        Ok(serde_json::from_value(body)?)
    }
}

/// `Some(message)` when the body reports `success: false`
fn rejection(body: &serde_json::Value) -> Option<String> {
    let success = body.get("success").and_then(|s| s.as_bool()).unwrap_or(false);
    if success {
        return None;
    }

    let message = body
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_REJECTION);
    Some(message.to_string())
}
