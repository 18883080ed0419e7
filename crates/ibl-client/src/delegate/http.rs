//! `ReqwestDelegate` - default HTTP transport.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::api::LocalHttpDelegate;
use super::error::TransportError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Default delay between retries.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport with timeout and optional retries.
///
/// Retries (default: none) apply to 5xx responses and connectivity failures
/// only. The final failure is returned as a [`TransportError`].
#[derive(Debug, Clone)]
pub struct ReqwestDelegate {
    /// HTTP client (reqwest, gzip enabled).
    http_client: Client,
    /// Number of retries after the first attempt.
    retries: u32,
    /// Delay between attempts.
    retry_delay: Duration,
}

/// Builder for `ReqwestDelegate`.
#[derive(Debug, Default)]
pub struct ReqwestDelegateBuilder {
    user_agent: Option<String>,
    timeout: Option<Duration>,
    retries: Option<u32>,
    retry_delay: Option<Duration>,
}

impl ReqwestDelegateBuilder {
    /// Creates a new builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            user_agent: None,
            timeout: None,
            retries: None,
            retry_delay: None,
        }
    }

    /// Sets the User-Agent (default: `ibl-client/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 2s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the number of retries on 5xx / connectivity failure (default: 0).
    #[must_use]
    pub const fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Sets the delay between retries (default: 500ms).
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Builds the delegate.
    ///
    /// # Errors
    ///
    /// Returns an error if the `reqwest::Client` build fails.
    pub fn build(self) -> Result<ReqwestDelegate> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(ReqwestDelegate {
            http_client,
            retries: self.retries.unwrap_or(0),
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
        })
    }
}

impl ReqwestDelegate {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> ReqwestDelegateBuilder {
        ReqwestDelegateBuilder::new()
    }

    /// Sends a single GET request.
    async fn get_once(
        &self,
        url: &Url,
        query: &[(String, String)],
    ) -> std::result::Result<Value, TransportError> {
        let request = self
            .http_client
            .get(url.clone())
            .query(query)
            .build()
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;
        let request_url = request.url().to_string();

        tracing::debug!(url = %request_url, "IBL API request");

        let response = self.http_client.execute(request).await.map_err(|source| {
            TransportError::Request {
                url: request_url.clone(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: request_url,
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request {
                url: request_url.clone(),
                source,
            })?;
        tracing::trace!(url = %request_url, body_len = body.len(), "IBL API response body received");

        serde_json::from_str(&body).map_err(|source| TransportError::Decode {
            url: request_url,
            source,
        })
    }
}

impl LocalHttpDelegate for ReqwestDelegate {
    #[instrument(skip_all)]
    async fn get(&self, url: &Url, query: &[(String, String)]) -> Result<Value> {
        let mut attempt = 0u32;
        loop {
            match self.get_once(url, query).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    attempt = attempt.saturating_add(1);
                    tracing::warn!(
                        %url,
                        attempt,
                        max_retries = self.retries,
                        error = %e,
                        "IBL API request failed, will retry"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn test_delegate(retries: u32) -> ReqwestDelegate {
        ReqwestDelegate::builder()
            .user_agent("test/0.0.0")
            .retries(retries)
            .retry_delay(Duration::from_millis(0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        // Arrange & Act
        let delegate = ReqwestDelegate::builder().build().unwrap();

        // Assert
        assert_eq!(delegate.retries, 0);
        assert_eq!(delegate.retry_delay, DEFAULT_RETRY_DELAY);
    }

    #[tokio::test]
    async fn test_get_decodes_json_and_sends_query() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/ibl/categories.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/ibl/v1/categories"))
            .and(wiremock::matchers::query_param("rights", "web"))
            .and(wiremock::matchers::header("User-Agent", "test/0.0.0"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = Url::parse(&format!("{}/ibl/v1/categories", mock_server.uri())).unwrap();
        let query = [(String::from("rights"), String::from("web"))];

        // Act
        let value = test_delegate(0).get(&url, &query).await.unwrap();

        // Assert
        assert_eq!(value["categories"][1]["id"], "comedy");
    }

    #[tokio::test]
    async fn test_get_non_2xx_returns_transport_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404).set_body_string("not found"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = Url::parse(&format!("{}/ibl/v1/episodes/x", mock_server.uri())).unwrap();

        // Act
        let err = test_delegate(3).get(&url, &[]).await.unwrap_err();

        // Assert
        let transport = err.downcast_ref::<TransportError>().unwrap();
        assert_eq!(transport.status(), Some(404));
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_get_retries_server_errors() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        // 500 for every attempt: initial + 2 retries
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .expect(3)
            .mount(&mock_server)
            .await;

        let url = Url::parse(&format!("{}/ibl/v1/home/highlights", mock_server.uri())).unwrap();

        // Act
        let result = test_delegate(2).get(&url, &[]).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<TransportError>().unwrap().status(),
            Some(500)
        );
    }

    #[tokio::test]
    async fn test_get_without_retries_sends_once() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = Url::parse(&format!("{}/ibl/v1/channels", mock_server.uri())).unwrap();

        // Act
        let result = test_delegate(0).get(&url, &[]).await;

        // Assert
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_invalid_json_returns_decode_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = Url::parse(&format!("{}/ibl/v1/channels", mock_server.uri())).unwrap();

        // Act
        let err = test_delegate(2).get(&url, &[]).await.unwrap_err();

        // Assert
        assert!(matches!(
            err.downcast_ref::<TransportError>(),
            Some(TransportError::Decode { .. })
        ));
    }
}
