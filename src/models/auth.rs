use serde::{Deserialize, Serialize};

/// Operator credentials submitted to the login endpoint. Never persisted.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub password: String,
    pub username: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            username: username.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token pair issued by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// In-memory session mirrored to the token store.
///
/// Both tokens are either present or absent; a half-populated session is
/// treated as signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn from_parts(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        match (access_token, refresh_token) {
            (Some(access_token), Some(refresh_token)) => Self {
                access_token: Some(access_token),
                refresh_token: Some(refresh_token),
            },
            _ => Self::default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.access_token.is_some() && self.refresh_token.is_some()
    }
}

impl From<TokenPair> for Session {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: Some(pair.access_token),
            refresh_token: Some(pair.refresh_token),
        }
    }
}
