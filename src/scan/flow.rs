//! Scan flow: one decoded QR payload through validation, with a single
//! silent token refresh on 401.
//!
//! ```text
//! payload ──► scan(token) ──ok──► outcome
//!                 │
//!                401
//!                 ▼
//!          refresh_access_token ──none/err──► logout
//!                 │
//!              new token
//!                 ▼
//!           scan(new token) ──ok──► outcome
//!                 │
//!               any err ──► logout
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ScanApi, ScanError};
use crate::models::ScanOutcome;
use crate::session::SessionController;
use crate::validation::{validate_payload, ValidationError};

#[derive(Debug, Error)]
pub enum FlowError {
    /// Another payload is still being validated; this one was dropped
    #[error("A scan is already in progress")]
    Busy,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Not signed in")]
    NotAuthenticated,
    #[error(transparent)]
    Scan(ScanError),
    /// Refresh or retry failed; the session has been cleared
    #[error("Session expired, please sign in again")]
    SessionExpired,
}

/// Per-screen scan driver. At most one payload is in flight at a time.
pub struct ScanFlow {
    in_flight: AtomicBool,
    scanner: Arc<dyn ScanApi>,
    session: Arc<SessionController>,
}

/// Releases the in-flight flag when the flow ends or its future is dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ScanFlow {
    pub fn new(session: Arc<SessionController>, scanner: Arc<dyn ScanApi>) -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            scanner,
            session,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.in_flight))
    }

    /// Validate one decoded payload against the backend.
    ///
    /// Errors other than `SessionExpired` leave the session untouched and the
    /// operator may rescan.
    pub async fn submit(&self, payload: &str) -> Result<ScanOutcome, FlowError> {
        let Some(_guard) = self.try_begin() else {
            debug!("Scan in flight, ignoring payload");
            return Err(FlowError::Busy);
        };

        let payload = validate_payload(payload)?;
        let token = self
            .session
            .access_token()
            .await
            .ok_or(FlowError::NotAuthenticated)?;

        match self.scanner.scan(payload, &token).await {
            Ok(outcome) => {
                log_outcome(&outcome);
                Ok(outcome)
            }
            Err(ScanError::Unauthorized) => {
                debug!("Access token rejected, refreshing");
                self.refresh_and_retry(payload).await
            }
            Err(e) => {
                debug!(error = %e, "Scan failed");
                Err(FlowError::Scan(e))
            }
        }
    }

    async fn refresh_and_retry(&self, payload: &str) -> Result<ScanOutcome, FlowError> {
        let token = match self.session.refresh_access_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                warn!("No session to refresh, signing out");
                return self.expire().await;
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, signing out");
                return self.expire().await;
            }
        };

        match self.scanner.scan(payload, &token).await {
            Ok(outcome) => {
                log_outcome(&outcome);
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "Scan failed after token refresh, signing out");
                self.expire().await
            }
        }
    }

    async fn expire(&self) -> Result<ScanOutcome, FlowError> {
        self.session.logout().await;
        Err(FlowError::SessionExpired)
    }
}

fn log_outcome(outcome: &ScanOutcome) {
    info!(
        qr_code = %outcome.data.qr_code.id,
        booking_type = %outcome.data.booking_type,
        is_valid = outcome.data.is_valid,
        is_expired = outcome.data.is_expired,
        "Scan validated"
    );
}

impl std::fmt::Debug for ScanFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanFlow")
            .field("in_flight", &self.is_busy())
            .finish_non_exhaustive()
    }
}
