//! `IblClient` - catalogue client over the request layer.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::instrument;
use url::Url;

use crate::config::ClientOptions;
use crate::delegate::{LocalHttpDelegate, ReqwestDelegate, ReqwestDelegateBuilder};
use crate::endpoint::{CallStyle, Endpoint};
use crate::options::QueryOptions;
use crate::payload::Payload;
use crate::pids::{Pids, valid_id};
use crate::request::Request;

/// Default base URL for the IBL API v1.
pub const DEFAULT_BASE_URL: &str = "http://ibl.api.bbci.co.uk/ibl/v1";

/// Group id of the most popular episodes.
const POPULAR_GROUP: &str = "popular";

/// iPlayer Business Layer catalogue client.
///
/// Holds only the base URL and the transport, both fixed at construction, so a
/// single client can serve any number of concurrent calls.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct IblClient<D = ReqwestDelegate> {
    /// Request layer.
    request: Request<D>,
}

/// Builder for an `IblClient` over the default transport.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct IblClientBuilder {
    base_url: Option<Url>,
    delegate: ReqwestDelegateBuilder,
}

impl IblClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            delegate: ReqwestDelegateBuilder::new(),
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.delegate = self.delegate.user_agent(ua);
        self
    }

    /// Sets the per-request timeout (default: 2s).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.delegate = self.delegate.timeout(timeout);
        self
    }

    /// Sets the number of transport retries (default: 0).
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.delegate = self.delegate.retries(retries);
        self
    }

    /// Sets the delay between transport retries (default: 500ms).
    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.delegate = self.delegate.retry_delay(delay);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - The default base URL fails to parse.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<IblClient> {
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let delegate = self.delegate.build()?;

        Ok(IblClient::with_delegate_at(delegate, base_url))
    }
}

impl IblClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> IblClientBuilder {
        IblClientBuilder::new()
    }

    /// Builds a client over the default transport from `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// fails to build.
    pub fn from_options(options: &ClientOptions) -> Result<Self> {
        let base_url = Url::parse(&options.base_url)
            .with_context(|| format!("invalid base URL: {}", options.base_url))?;

        let mut builder = Self::builder()
            .base_url(base_url)
            .timeout(options.timeout())
            .retries(options.retries)
            .retry_delay(options.retry_delay());
        if let Some(ref ua) = options.user_agent {
            builder = builder.user_agent(ua);
        }
        builder.build()
    }
}

impl<D> IblClient<D> {
    /// Creates a client over a caller-supplied transport and the default base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the default base URL fails to parse.
    pub fn with_delegate(delegate: D) -> Result<Self> {
        let base_url = Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?;
        Ok(Self::with_delegate_at(delegate, base_url))
    }

    /// Creates a client over a caller-supplied transport and base URL.
    pub const fn with_delegate_at(delegate: D, base_url: Url) -> Self {
        Self {
            request: Request::new(delegate, base_url),
        }
    }

    /// The underlying request layer.
    pub const fn request(&self) -> &Request<D> {
        &self.request
    }
}

impl<D: LocalHttpDelegate> IblClient<D> {
    /// Fetches any catalogue endpoint.
    ///
    /// - Static lists (`categories`, `channels`): a non-empty `id` returns the
    ///   whole record at `<path>/<id>`; otherwise the list under the response
    ///   property.
    /// - Everything else: the response property, or every page's envelope when
    ///   `autoPaginate` is set.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    #[instrument(skip_all, fields(endpoint = ?endpoint))]
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        id: Option<&str>,
        options: &QueryOptions,
    ) -> Result<Payload> {
        let property = endpoint.response_property();

        match endpoint.call_style() {
            CallStyle::StaticList => {
                if let Some(id) = valid_id(id) {
                    let record = self.request.get(&endpoint.path(Some(id)), options).await?;
                    return Ok(Payload::Value(record));
                }
                let value = self
                    .request
                    .get_with_property_filter(&endpoint.path(None), property, options)
                    .await?;
                Ok(Payload::from(value))
            }
            CallStyle::Filtered => {
                let path = endpoint.path(id);
                if options.auto_paginate() {
                    let pages = self
                        .request
                        .get_with_auto_pagination(&path, property, options)
                        .await?;
                    return Ok(Payload::Pages(pages));
                }
                let value = self
                    .request
                    .get_with_property_filter(&path, property, options)
                    .await?;
                Ok(Payload::from(value))
            }
        }
    }

    /// Episodes by pid (`/episodes/{pids}`).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_episodes(
        &self,
        pids: impl Into<Pids>,
        options: &QueryOptions,
    ) -> Result<Payload> {
        let pids = pids.into();
        self.fetch(Endpoint::Episodes, Some(&pids.joined()), options)
            .await
    }

    /// Episodes in a group (`/groups/{group_id}/episodes`).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_group_episodes(
        &self,
        group_id: &str,
        options: &QueryOptions,
    ) -> Result<Payload> {
        self.fetch(Endpoint::GroupEpisodes, Some(group_id), options)
            .await
    }

    /// Most popular episodes (`/groups/popular/episodes`).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_popular_episodes(&self, options: &QueryOptions) -> Result<Payload> {
        self.get_group_episodes(POPULAR_GROUP, options).await
    }

    /// Recommendations for an episode (`/episodes/{episode_id}/recommendations`).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_episode_recommendations(
        &self,
        episode_id: &str,
        options: &QueryOptions,
    ) -> Result<Payload> {
        self.fetch(Endpoint::EpisodeRecommendations, Some(episode_id), options)
            .await
    }

    /// Episodes of a programme (`/programmes/{programme_id}/episodes`).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_programme_episodes(
        &self,
        programme_id: &str,
        options: &QueryOptions,
    ) -> Result<Payload> {
        self.fetch(Endpoint::ProgrammeEpisodes, Some(programme_id), options)
            .await
    }

    /// Programmes by pid (`/programmes/{pids}`).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_programmes(
        &self,
        pids: impl Into<Pids>,
        options: &QueryOptions,
    ) -> Result<Payload> {
        let pids = pids.into();
        self.fetch(Endpoint::Programmes, Some(&pids.joined()), options)
            .await
    }

    /// Programmes in a category (`/categories/{category}/programmes`).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_category_programmes(
        &self,
        category: &str,
        options: &QueryOptions,
    ) -> Result<Payload> {
        self.fetch(Endpoint::CategoryProgrammes, Some(category), options)
            .await
    }

    /// Highlights for a category (`/categories/{category_id}/highlights`).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_category_highlights(
        &self,
        category_id: &str,
        options: &QueryOptions,
    ) -> Result<Payload> {
        self.fetch(Endpoint::CategoryHighlights, Some(category_id), options)
            .await
    }

    /// Highlights for a channel (`/channels/{channel_id}/highlights`).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_channel_highlights(
        &self,
        channel_id: &str,
        options: &QueryOptions,
    ) -> Result<Payload> {
        self.fetch(Endpoint::ChannelHighlights, Some(channel_id), options)
            .await
    }

    /// Home page highlights (`/home/highlights`).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_home_highlights(&self, options: &QueryOptions) -> Result<Payload> {
        self.fetch(Endpoint::HomeHighlights, None, options).await
    }

    /// Broadcasts on a channel (`/channels/{channel_id}/broadcasts`).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_channel_broadcasts(
        &self,
        channel_id: &str,
        options: &QueryOptions,
    ) -> Result<Payload> {
        self.fetch(Endpoint::ChannelBroadcasts, Some(channel_id), options)
            .await
    }

    /// All categories, or one category record when `id` is non-empty.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_categories(&self, id: Option<&str>) -> Result<Payload> {
        self.fetch(Endpoint::Categories, id, &QueryOptions::new())
            .await
    }

    /// All channels, or one channel record when `id` is non-empty.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_channels(&self, id: Option<&str>) -> Result<Payload> {
        self.fetch(Endpoint::Channels, id, &QueryOptions::new())
            .await
    }
}
