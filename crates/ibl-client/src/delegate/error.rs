//! Transport error type.

/// Failure surfaced by the default transport.
///
/// Wrapped in `anyhow::Error`; use `downcast_ref::<TransportError>()` to
/// inspect the HTTP status.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum TransportError {
    /// The API answered with a non-2xx status.
    #[error("IBL API error (HTTP {status}) for {url}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL, including the query string.
        url: String,
        /// Response body, possibly empty.
        body: String,
    },
    /// Connection, timeout or body read failure.
    #[error("request failed: {url}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The body was not valid JSON.
    #[error("failed to decode JSON response: {url}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// HTTP status code, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request { .. } | Self::Decode { .. } => None,
        }
    }

    /// Server errors and connectivity failures may be retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500,
            Self::Request { .. } => true,
            Self::Decode { .. } => false,
        }
    }
}
