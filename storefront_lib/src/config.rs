//! Runtime configuration read from the environment.

use std::time::Duration;

use storefront_api::{Client, DEFAULT_TIMEOUT};

use crate::error::AdminError;

/// Base URL used when `STOREFRONT_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:3333/";

/// Connection settings for the admin backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminConfig {
    /// Base URL every endpoint path is resolved against.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AdminConfig {
    /// Reads `STOREFRONT_API_URL` and `STOREFRONT_TIMEOUT_SECS`, falling back to
    /// the defaults for missing or unparseable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_url = lookup("STOREFRONT_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_url);
        let timeout = lookup("STOREFRONT_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        Self { api_url, timeout }
    }

    /// Builds the API client for this configuration.
    pub fn client(&self) -> Result<Client, AdminError> {
        Ok(Client::with_timeout(&self.api_url, self.timeout)?)
    }
}
