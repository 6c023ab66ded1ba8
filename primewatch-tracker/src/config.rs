//! Tracker configuration
//!
//! Where the job service lives and how the tracker paces itself. Values are
//! resolved once at process start.

use std::time::Duration;

/// Default base URL of the job service
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Tracker configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Job service base URL (e.g., "http://localhost:8000")
    pub api_base_url: String,

    /// Time between two status polls of the same job
    pub poll_interval: Duration,

    /// Maximum time a single HTTP request may take
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with default pacing
    pub fn new(api_base_url: String) -> Self {
        Self {
            api_base_url,
            poll_interval: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - API_BASE_URL (optional, default: http://localhost:8000)
    /// - POLL_INTERVAL_MS (optional, milliseconds, default: 1000)
    /// - REQUEST_TIMEOUT_SECS (optional, seconds, default: 30)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let api_base_url = lookup("API_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.api_base_url);

        let poll_interval = match lookup("POLL_INTERVAL_MS") {
            Some(s) => Duration::from_millis(
                s.parse::<u64>()
                    .map_err(|_| anyhow::anyhow!("POLL_INTERVAL_MS must be an integer, got {s:?}"))?,
            ),
            None => defaults.poll_interval,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(s) => Duration::from_secs(s.parse::<u64>().map_err(|_| {
                anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be an integer, got {s:?}")
            })?),
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_base_url,
            poll_interval,
            request_timeout,
        })
    }

    /// Replaces the base URL, keeping the rest
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_base_url.is_empty() {
            anyhow::bail!("api_base_url cannot be empty");
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            anyhow::bail!("api_base_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL.to_string())
    }
}
