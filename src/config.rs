// Client configuration.
// Reads the catalog API location, credentials, and logging level from the environment.

use std::time::Duration;

use crate::error::{LibraryError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings needed to talk to the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
    /// Bearer token sent with every request, if any.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Default log level for the crate when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from `BOOKSHELF_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_url = get("BOOKSHELF_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(LibraryError::Config(format!(
                "BOOKSHELF_API_URL must be an http(s) URL, got {:?}",
                base_url
            )));
        }

        let timeout_secs = match get("BOOKSHELF_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(LibraryError::Config(format!(
                        "BOOKSHELF_TIMEOUT_SECS must be a positive integer, got {:?}",
                        raw
                    )));
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: get("BOOKSHELF_API_TOKEN"),
            timeout: Duration::from_secs(timeout_secs),
            log_level: get("BOOKSHELF_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}
