use redb::TableDefinition;

/// Persisted credentials: fixed key -> opaque token string
pub const TOKENS: TableDefinition<&str, &str> = TableDefinition::new("tokens");

/// Key under which the access token is stored
pub const ACCESS_TOKEN_KEY: &str = "@dviu_qr_scanner_access_token";

/// Key under which the refresh token is stored
pub const REFRESH_TOKEN_KEY: &str = "@dviu_qr_scanner_refresh_token";
