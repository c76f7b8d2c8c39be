use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Backend root, without a trailing slash
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the token database
    pub data_dir: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timeout: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("API_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| ApiConfig::default().base_url);

        let data_dir = lookup("DATA_DIR").unwrap_or_else(|| StorageConfig::default().data_dir);

        let timeout = match lookup("HTTP_TIMEOUT_SECONDS") {
            Some(raw) => {
                let seconds: u64 = raw.trim().parse().map_err(|_| {
                    ConfigError::ValidationError(format!(
                        "HTTP_TIMEOUT_SECONDS must be a positive integer, got {raw:?}"
                    ))
                })?;
                Some(Duration::from_secs(seconds))
            }
            None => None,
        };

        let config = Config {
            api: ApiConfig { base_url, timeout },
            storage: StorageConfig { data_dir },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "API_BASE_URL must start with http:// or https://, got {:?}",
                self.api.base_url
            )));
        }
        if self.api.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ValidationError(
                "HTTP_TIMEOUT_SECONDS must be greater than 0".to_string(),
            ));
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "DATA_DIR cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
