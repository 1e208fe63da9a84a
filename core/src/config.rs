//! Client configuration.
//!
//! # Design
//! One immutable value per client instead of a process-wide object, so two
//! clients pointed at different hosts never interfere. Every field has a
//! default and `#[serde(default)]` lets a host application deserialize a
//! partial config from whatever format it already uses.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const DEFAULT_HOST: &str = "api.spiget.org";
pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_VERSION: &str = "v1";
pub const DEFAULT_USER_AGENT: &str = concat!("spiget-core/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// API version segment, the `v1` in `/v1/resources`.
    pub version: String,
    pub user_agent: String,
    /// Use `https` instead of plain `http`.
    pub secure: bool,
    pub connect_timeout_ms: u64,
    /// Total time allowed for one request, body included.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            version: DEFAULT_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            secure: false,
            connect_timeout_ms: 5_000,
            timeout_ms: 30_000,
        }
    }
}

impl ClientConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.trim_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = millis_ceil(timeout);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = millis_ceil(timeout);
        self
    }

    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn validate(&self) -> Result<(), ApiError> {
        if self.host.trim().is_empty() {
            return Err(ApiError::InvalidConfig("host is empty".to_string()));
        }
        if self.version.trim_matches('/').trim().is_empty() {
            return Err(ApiError::InvalidConfig("version is empty".to_string()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ApiError::InvalidConfig("user agent is empty".to_string()));
        }
        if self.connect_timeout_ms == 0 || self.timeout_ms == 0 {
            return Err(ApiError::InvalidConfig("timeouts must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Whole milliseconds, rounded up so a sub-millisecond timeout stays non-zero.
fn millis_ceil(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX)
}
