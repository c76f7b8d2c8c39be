pub mod db;
mod tables;
pub mod tokens;

pub use db::{Database, DatabaseError};
pub use tables::*;
pub use tokens::{MemoryTokenStore, RedbTokenStore, StoreError, TokenKind, TokenStore};
