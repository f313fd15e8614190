use std::{env, time::Duration};

use interfaces_github_starred::index::API_ROOT;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_DATABASE: &str = "ghs.db";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database: String,
    pub api_root: String,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            api_root: API_ROOT.to_string(),
            token: None,
            timeout: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MissingToken: set GITHUB_TOKEN to a personal access token")]
    MissingToken,

    #[error("InvalidTimeout: GHS_TIMEOUT_SECS={value}: {source}")]
    InvalidTimeout {
        value: String,
        source: std::num::ParseIntError,
    },
}

impl Config {
    /// Reads `GITHUB_TOKEN`, `GHS_DATABASE`, `GHS_API_ROOT` and
    /// `GHS_TIMEOUT_SECS`, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timeout = match non_empty("GHS_TIMEOUT_SECS") {
            Some(value) => Some(Duration::from_secs(
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|source| ConfigError::InvalidTimeout { value, source })?,
            )),
            None => None,
        };

        let config = Self {
            database: non_empty("GHS_DATABASE").unwrap_or(defaults.database),
            api_root: non_empty("GHS_API_ROOT").unwrap_or(defaults.api_root),
            token: non_empty("GITHUB_TOKEN"),
            timeout,
        };

        debug!(
            database = %config.database,
            api_root = %config.api_root,
            token = config.token.is_some(),
            timeout = ?config.timeout,
            "configuration loaded"
        );

        Ok(config)
    }

    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token.as_deref().ok_or(ConfigError::MissingToken)
    }
}
