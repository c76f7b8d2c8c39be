//! checkin-scanner - admin check-in client for booking QR codes
//!
//! This crate provides the pieces behind a door scanner:
//! - Admin login and access-token refresh against the booking backend
//! - Token persistence in a local redb key-value store
//! - A session controller deciding between splash, login and scanner surfaces
//! - A scan flow with one silent refresh-and-retry on 401
//! - Status labels and detail cards for event and restaurant bookings

pub mod api;
pub mod config;
pub mod models;
pub mod present;
pub mod scan;
pub mod session;
pub mod storage;
#[cfg(test)]
pub mod testutil;
pub mod validation;

use std::sync::Arc;

use api::{build_http_client, AuthClient, ScanClient};
use config::Config;
use scan::ScanFlow;
use session::SessionController;
use storage::{RedbTokenStore, TokenStore};

/// Wired application: one session controller and the scanner screen's flow
pub struct AppState {
    pub config: Config,
    pub scan_flow: ScanFlow,
    pub session: Arc<SessionController>,
}

impl AppState {
    /// Open the token store and build both HTTP clients from `config`.
    /// The session still has to be bootstrapped.
    pub fn open(config: Config) -> anyhow::Result<Self> {
        let http = build_http_client(config.api.timeout)?;
        Self::with_http_client(config, http)
    }

    /// Like [`AppState::open`] but with a caller-built HTTP client
    pub fn with_http_client(config: Config, http: reqwest::Client) -> anyhow::Result<Self> {
        let store: Arc<dyn TokenStore> = Arc::new(RedbTokenStore::open(&config.storage.data_dir)?);

        let auth = Arc::new(AuthClient::new(config.api.base_url.clone(), http.clone()));
        let scanner = Arc::new(ScanClient::new(config.api.base_url.clone(), http));

        let session = Arc::new(SessionController::new(store, auth));
        let scan_flow = ScanFlow::new(Arc::clone(&session), scanner);

        Ok(Self {
            config,
            scan_flow,
            session,
        })
    }
}
