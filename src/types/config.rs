//! Client configuration

use super::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, USER_AGENT};
use std::env;
use std::time::Duration;

/// Environment variable overriding the marketplace origin
pub const ENV_BASE_URL: &str = "X402_BAZAAR_URL";
/// Environment variable overriding the request timeout, in seconds
pub const ENV_TIMEOUT: &str = "X402_BAZAAR_TIMEOUT";

/// Configuration captured once when an [`crate::X402Client`] is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Marketplace origin, without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config pointing at the given marketplace origin
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Build a config from `X402_BAZAAR_URL` and `X402_BAZAAR_TIMEOUT`, falling back to defaults
    pub fn from_env() -> crate::Result<Self> {
        let mut config = match env::var(ENV_BASE_URL) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        };

        if let Ok(raw) = env::var(ENV_TIMEOUT) {
            let seconds: u64 = raw.trim().parse().map_err(|_| {
                crate::X402Error::config(format!("{} must be a whole number of seconds", ENV_TIMEOUT))
            })?;
            config = config.with_timeout(Duration::from_secs(seconds));
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.base_url.is_empty() {
            return Err(crate::X402Error::config("Base URL cannot be empty"));
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| crate::X402Error::config(format!("Invalid base URL: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(crate::X402Error::config(
                "Base URL must start with http:// or https://",
            ));
        }

        if self.timeout.is_zero() {
            return Err(crate::X402Error::config("Timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the request timeout in whole seconds
    pub fn with_timeout_secs(self, seconds: u64) -> Self {
        self.with_timeout(Duration::from_secs(seconds))
    }

    /// Request timeout in whole seconds, rounded up
    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs() + u64::from(self.timeout.subsec_nanos() > 0)
    }

    /// Set the `User-Agent` header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
