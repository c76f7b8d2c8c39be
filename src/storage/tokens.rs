//! Token persistence behind the [`TokenStore`] seam.
//!
//! The store is a passive mirror of the in-memory session: values are
//! opaque strings, never validated and never expired here.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use super::db::{Database, DatabaseError};
use super::tables::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    /// Raised by store implementations outside this crate
    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Fixed storage key for this kind of token
    pub const fn key(self) -> &'static str {
        match self {
            TokenKind::Access => ACCESS_TOKEN_KEY,
            TokenKind::Refresh => REFRESH_TOKEN_KEY,
        }
    }
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn save(&self, kind: TokenKind, value: &str) -> Result<(), StoreError>;

    async fn get(&self, kind: TokenKind) -> Result<Option<String>, StoreError>;

    async fn clear(&self, kind: TokenKind) -> Result<(), StoreError>;

    /// Write both tokens concurrently. Resolves once both writes finish;
    /// the first failure is returned and nothing is rolled back.
    async fn save_all(&self, access_token: &str, refresh_token: &str) -> Result<(), StoreError> {
        let (access, refresh) = tokio::join!(
            self.save(TokenKind::Access, access_token),
            self.save(TokenKind::Refresh, refresh_token),
        );
        access?;
        refresh
    }

    /// Remove both tokens concurrently, with the same semantics as [`TokenStore::save_all`].
    async fn clear_all(&self) -> Result<(), StoreError> {
        let (access, refresh) = tokio::join!(
            self.clear(TokenKind::Access),
            self.clear(TokenKind::Refresh),
        );
        access?;
        refresh
    }
}

// ============================================================================
// redb-backed store
// ============================================================================

/// Durable token store on top of the scanner's redb database.
///
/// redb calls block, so each operation runs on the blocking pool.
#[derive(Clone)]
pub struct RedbTokenStore {
    db: Arc<Database>,
}

impl RedbTokenStore {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    /// Open (or create) the database under `data_dir`
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        Ok(Self::new(Database::open(data_dir)?))
    }
}

#[async_trait]
impl TokenStore for RedbTokenStore {
    async fn save(&self, kind: TokenKind, value: &str) -> Result<(), StoreError> {
        let db = Arc::clone(&self.db);
        let value = value.to_string();
        tokio::task::spawn_blocking(move || db.put_token(kind.key(), &value)).await??;
        debug!(?kind, "Saved token");
        Ok(())
    }

    async fn get(&self, kind: TokenKind) -> Result<Option<String>, StoreError> {
        let db = Arc::clone(&self.db);
        let token = tokio::task::spawn_blocking(move || db.get_token(kind.key())).await??;
        Ok(token)
    }

    async fn clear(&self, kind: TokenKind) -> Result<(), StoreError> {
        let db = Arc::clone(&self.db);
        let removed = tokio::task::spawn_blocking(move || db.delete_token(kind.key())).await??;
        debug!(?kind, removed, "Cleared token");
        Ok(())
    }
}

impl std::fmt::Debug for RedbTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbTokenStore").finish_non_exhaustive()
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Process-local token store; contents are lost when it is dropped
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<TokenKind, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(&self, kind: TokenKind, value: &str) -> Result<(), StoreError> {
        self.tokens.lock().await.insert(kind, value.to_string());
        Ok(())
    }

    async fn get(&self, kind: TokenKind) -> Result<Option<String>, StoreError> {
        Ok(self.tokens.lock().await.get(&kind).cloned())
    }

    async fn clear(&self, kind: TokenKind) -> Result<(), StoreError> {
        self.tokens.lock().await.remove(&kind);
        Ok(())
    }
}
