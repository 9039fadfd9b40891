//! Configuration management for tasklist.
//!
//! Configuration can be set via environment variables:
//! - `TASKLIST_BACKEND` - Optional. `memory`, `local` or `remote`. Defaults to `remote`
//!   when `API_URL` is set, otherwise `local`.
//! - `API_URL` - Required for the remote backend. Base URL of the todos API.
//! - `TASKLIST_DATA_DIR` - Optional. Local store directory. Defaults to `./.tasklist`.
//! - `TASKLIST_HTTP_TIMEOUT_SECS` - Optional. Remote request timeout. Defaults to `30`,
//!   `0` disables it.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::store::StoreKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Active persistence backend
    pub backend: StoreKind,

    /// Base URL of the todos API, without trailing slash
    pub api_url: Option<String>,

    /// Directory holding the local blob
    pub data_dir: PathBuf,

    /// Request timeout for the remote store (`None` = wait forever)
    pub http_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if the remote backend is selected
    /// without `API_URL`, and `ConfigError::InvalidValue` for unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let backend = match lookup("TASKLIST_BACKEND") {
            Some(value) => value
                .parse::<StoreKind>()
                .map_err(|e| ConfigError::InvalidValue("TASKLIST_BACKEND".to_string(), e))?,
            None if api_url.is_some() => StoreKind::Remote,
            None => StoreKind::Local,
        };

        if backend == StoreKind::Remote && api_url.is_none() {
            return Err(ConfigError::MissingEnvVar("API_URL".to_string()));
        }

        let data_dir = lookup("TASKLIST_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(".tasklist")
            });

        let timeout_secs: u64 = lookup("TASKLIST_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .trim()
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("TASKLIST_HTTP_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;
        let http_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            backend,
            api_url,
            data_dir,
            http_timeout,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(backend: StoreKind, data_dir: PathBuf) -> Self {
        Self {
            backend,
            api_url: None,
            data_dir,
            http_timeout: Some(Duration::from_secs(30)),
        }
    }
}
