use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};

use crate::api::{AuthApi, AuthError};
use crate::models::{Credentials, Session};
use crate::storage::{StoreError, TokenKind, TokenStore};
use crate::validation::{validate_credentials, ValidationError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Stored tokens have not been read yet
    Loading,
    Guest,
    Authenticated,
}

/// Which set of screens the operator may reach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Splash,
    Login,
    Scanner,
}

impl AuthState {
    pub fn surface(self) -> Surface {
        match self {
            AuthState::Loading => Surface::Splash,
            AuthState::Guest => Surface::Login,
            AuthState::Authenticated => Surface::Scanner,
        }
    }
}

/// Owner of the operator's session.
///
/// The in-memory [`Session`] is the source of truth; every mutation is
/// mirrored to the token store. The state is derived: `Loading` until
/// [`SessionController::bootstrap`] has run, then `Authenticated` exactly when
/// both tokens are held.
pub struct SessionController {
    auth: Arc<dyn AuthApi>,
    bootstrapped: OnceCell<()>,
    session: RwLock<Session>,
    store: Arc<dyn TokenStore>,
}

impl SessionController {
    pub fn new(store: Arc<dyn TokenStore>, auth: Arc<dyn AuthApi>) -> Self {
        Self {
            auth,
            bootstrapped: OnceCell::new(),
            session: RwLock::new(Session::default()),
            store,
        }
    }

    /// Restore tokens from the store. Only the first call reads storage;
    /// concurrent callers wait for it and later calls return immediately.
    pub async fn bootstrap(&self) -> AuthState {
        self.bootstrapped
            .get_or_init(|| async {
                let (access, refresh) = tokio::join!(
                    self.store.get(TokenKind::Access),
                    self.store.get(TokenKind::Refresh),
                );

                let session = match (access, refresh) {
                    (Ok(access), Ok(refresh)) => Session::from_parts(access, refresh),
                    (Err(e), _) | (_, Err(e)) => {
                        warn!(error = %e, "Failed to read stored tokens, starting signed out");
                        Session::default()
                    }
                };

                let restored = session.is_complete();
                *self.session.write().await = session;
                info!(restored, "Session bootstrapped");
            })
            .await;

        self.state().await
    }

    pub async fn state(&self) -> AuthState {
        if !self.bootstrapped.initialized() {
            return AuthState::Loading;
        }
        if self.session.read().await.is_complete() {
            AuthState::Authenticated
        } else {
            AuthState::Guest
        }
    }

    pub async fn surface(&self) -> Surface {
        self.state().await.surface()
    }

    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.session.read().await.access_token.clone()
    }

    /// Sign in with operator credentials.
    ///
    /// Blank fields are rejected locally. On any failure the current session
    /// is left exactly as it was.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), SessionError> {
        validate_credentials(credentials)?;

        let pair = self.auth.login(credentials).await?;
        self.store
            .save_all(&pair.access_token, &pair.refresh_token)
            .await?;
        *self.session.write().await = Session::from(pair);

        info!(username = %credentials.username, "Operator signed in");
        Ok(())
    }

    /// Obtain a new access token with the held refresh token.
    ///
    /// Returns `Ok(None)` without any network call when no complete session
    /// is held. The refresh token itself is kept as is.
    pub async fn refresh_access_token(&self) -> Result<Option<String>, SessionError> {
        let (access_token, refresh_token) = {
            let session = self.session.read().await;
            match (&session.access_token, &session.refresh_token) {
                (Some(access), Some(refresh)) => (access.clone(), refresh.clone()),
                _ => return Ok(None),
            }
        };

        let new_token = self.auth.refresh(&access_token, &refresh_token).await?;
        self.store.save(TokenKind::Access, &new_token).await?;

        {
            let mut session = self.session.write().await;
            // A logout or re-login while the refresh was in flight wins
            if session.refresh_token.as_deref() == Some(refresh_token.as_str()) {
                session.access_token = Some(new_token.clone());
            }
        }

        debug!("Access token refreshed");
        Ok(Some(new_token))
    }

    /// Drop the session. The in-memory clear always happens; a storage
    /// failure is logged and otherwise ignored.
    pub async fn logout(&self) {
        *self.session.write().await = Session::default();

        if let Err(e) = self.store.clear_all().await {
            warn!(error = %e, "Failed to clear stored tokens");
        }
        info!("Operator signed out");
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("bootstrapped", &self.bootstrapped.initialized())
            .finish_non_exhaustive()
    }
}
