//! HTTP clients for the booking backend.
//!
//! Both clients share one `reqwest::Client` and a base URL; the seams the
//! session controller and scan flow depend on are the [`AuthApi`] and
//! [`ScanApi`] traits.

pub mod auth;
pub mod envelope;
pub mod scan;

use std::time::Duration;

pub use auth::{AuthApi, AuthClient, AuthError};
pub use scan::{ScanApi, ScanClient, ScanError};

pub const LOGIN_PATH: &str = "/auth/admin/login";
pub const REFRESH_PATH: &str = "/auth/admin/refresh";
pub const SCAN_PATH: &str = "/qr-code/scan";

/// Header carrying the refresh token on refresh calls
pub const REFRESH_TOKEN_HEADER: &str = "X-Refresh-Token";

/// Build the HTTP client shared by the auth and scan clients.
///
/// `timeout` of `None` leaves requests unbounded.
pub fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(2);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
