//! Client configuration.
//!
//! ```ignore
//! use spherag::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()?
//!     .with_request_timeout(Duration::from_secs(10));
//! ```

use std::time::Duration;

use crate::error::{SpheragResult, SystemError};

/// Data host used when `SPHERAG_API_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "https://preapicore.spherag.com";

/// Login endpoint used when `SPHERAG_AUTH_URL` is unset.
pub const DEFAULT_AUTH_URL: &str = "https://preapi.spherag.com/Authentication/Login";

/// Records per page for every list endpoint.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Exponential backoff for retryable failures.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. 1 disables retries.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for each following one.
    pub base_delay: Duration,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(4),
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Settings for [`ApiClient`](crate::api::ApiClient).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub auth_url: String,
    pub page_size: u32,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data host. A trailing slash is dropped.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Defaults overridden by `SPHERAG_API_URL`, `SPHERAG_AUTH_URL` and
    /// `SPHERAG_TIMEOUT_SECS`.
    pub fn from_env() -> SpheragResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> SpheragResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("SPHERAG_API_URL") {
            config = config.with_api_base_url(url);
        }
        if let Some(url) = non_empty("SPHERAG_AUTH_URL") {
            config = config.with_auth_url(url);
        }
        if let Some(raw) = non_empty("SPHERAG_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| SystemError::InvalidEnvironment {
                variable: "SPHERAG_TIMEOUT_SECS".to_string(),
                message: format!("'{}' is not a whole number of seconds", raw),
            })?;
            if secs == 0 {
                return Err(SystemError::InvalidEnvironment {
                    variable: "SPHERAG_TIMEOUT_SECS".to_string(),
                    message: "must be greater than zero".to_string(),
                }
                .into());
            }
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
