//! Client construction settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_BASE_URL;

/// Settings for [`crate::IblClient::from_options`].
///
/// Deserializable so a host application can embed it in its own
/// configuration; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// API base URL.
    #[serde(alias = "baseUrl")]
    pub base_url: String,
    /// User-Agent header (default: `ibl-client/<version>`).
    #[serde(alias = "userAgent")]
    pub user_agent: Option<String>,
    /// Per-request timeout in milliseconds.
    #[serde(alias = "timeout")]
    pub timeout_ms: u64,
    /// Transport retries on 5xx / connectivity failure.
    pub retries: u32,
    /// Delay between retries in milliseconds.
    #[serde(alias = "retryTimeout")]
    pub retry_delay_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            user_agent: None,
            timeout_ms: 2_000,
            retries: 0,
            retry_delay_ms: 500,
        }
    }
}

impl ClientOptions {
    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Delay between retries.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
