use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::domain::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown error policy: {0} (expected `surface` or `swallow`)")]
    UnknownErrorPolicy(String),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// What a list does with a failed page request.
///
/// Both policies empty the page; `Surface` also publishes a transient notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    #[default]
    Surface,
    Swallow,
}

impl FromStr for ErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surface" => Ok(ErrorPolicy::Surface),
            "swallow" => Ok(ErrorPolicy::Swallow),
            other => Err(ConfigError::UnknownErrorPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Surface => f.write_str("surface"),
            ErrorPolicy::Swallow => f.write_str("swallow"),
        }
    }
}

/// Settings shared by every controller of one console session.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL the `/api/...` paths are appended to.
    pub api_url: String,
    pub page_size: u32,
    /// Quiet period after the last filter/sort edit before a list fetches.
    pub debounce: Duration,
    pub request_timeout: Duration,
    pub error_policy: ErrorPolicy,
    /// Buffer size of each list service's request channel.
    pub channel_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            error_policy: ErrorPolicy::default(),
            channel_capacity: 32,
        }
    }
}

impl ClientConfig {
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "page_size",
                value: page_size.to_string(),
            });
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: "channel_capacity",
                value: capacity.to_string(),
            });
        }
        self.channel_capacity = capacity;
        Ok(self)
    }
}
