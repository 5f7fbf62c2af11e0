//! Client settings.
//!
//! Only the API key is secret; everything else has a working default.

use std::env;

use crate::window::WINDOW_MS;

/// Base URL of the public API.
pub const DEFAULT_BASE_URL: &str = "https://hackforums.net/api/v1";

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "HfApiClient/1.0";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "HF_API_KEY";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_VAR: &str = "HF_API_BASE_URL";

/// Non-secret client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API root every endpoint path is appended to.
    pub base_url: String,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Length of the rate-limit window in milliseconds. Values below one are raised to one.
    pub window_ms: i64,
}

impl Config {
    /// Returns the default settings with the base URL taken from
    /// `HF_API_BASE_URL` when it is set and not empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = env::var(BASE_URL_VAR).ok().filter(|url| !url.is_empty()) {
            log::debug!("using base url from {BASE_URL_VAR}: {url}");
            config.base_url = url;
        }
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            window_ms: WINDOW_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_api() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://hackforums.net/api/v1");
        assert_eq!(config.window_ms, 3_600_000);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn env_overrides_base_url() {
        env::set_var(BASE_URL_VAR, "http://127.0.0.1:8080/api/v1");
        let config = Config::from_env();
        env::remove_var(BASE_URL_VAR);
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api/v1");
        assert_eq!(config.window_ms, WINDOW_MS);
    }

    #[test]
    fn builder_reads_api_key_from_env() {
        use crate::{client::Builder, error::Error};

        env::remove_var(API_KEY_VAR);
        let unset = Builder::from_env().build();
        assert!(matches!(unset, Err(Error::MissingApiKey(API_KEY_VAR))));

        env::set_var(API_KEY_VAR, "");
        let empty = Builder::from_env().build();
        assert!(matches!(empty, Err(Error::MissingApiKey(API_KEY_VAR))));

        env::set_var(API_KEY_VAR, "env-key");
        let builder = Builder::from_env();
        env::remove_var(API_KEY_VAR);
        assert!(format!("{builder:?}").contains("<redacted>"));
        assert!(builder.build().is_ok());
    }
}
