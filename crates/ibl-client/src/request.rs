//! Request layer: URL construction, property unwrapping and auto-pagination.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::delegate::LocalHttpDelegate;
use crate::options::{AUTO_PAGINATE, PAGE, PER_PAGE, QueryOptions, QueryValue};

/// First page requested when auto-pagination starts without a `page` option.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when auto-pagination starts without a `per_page` option.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Pagination counters reported by a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageInfo {
    /// Total number of items across all pages.
    pub count: u64,
    /// Page number of this response.
    pub page: u64,
    /// Page size of this response.
    pub per_page: u64,
}

impl PageInfo {
    /// Reads counters from the top level of `envelope`, falling back to the
    /// object under `property`.
    #[must_use]
    pub fn from_envelope(envelope: &Value, property: &str) -> Option<Self> {
        Self::read(envelope).or_else(|| envelope.get(property).and_then(Self::read))
    }

    fn read(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Self::deserialize(value).ok()
    }

    /// Returns `true` while `count > page * per_page`.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.per_page > 0
            && self
                .page
                .checked_mul(self.per_page)
                .is_some_and(|seen| self.count > seen)
    }
}

/// Joins request paths onto a base URL and fetches them through a delegate.
///
/// Holds no per-call state: every call builds its own query pairs from the
/// caller's options, so the caller's [`QueryOptions`] are never mutated.
#[derive(Debug)]
pub struct Request<D> {
    /// Transport.
    delegate: D,
    /// Base URL, e.g. `http://ibl.api.bbci.co.uk/ibl/v1`.
    base_url: Url,
}

impl<D> Request<D> {
    /// Creates a request layer over `delegate`.
    pub const fn new(delegate: D, base_url: Url) -> Self {
        Self { delegate, base_url }
    }

    /// Base URL requests are resolved against.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Injected transport.
    pub const fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Joins `path` onto the base URL with exactly one `/` between them.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined string is not a valid URL.
    pub fn create_url(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let joined = format!("{base}/{path}");
        Url::parse(&joined).with_context(|| format!("invalid request URL: {joined}"))
    }
}

impl<D: LocalHttpDelegate> Request<D> {
    /// Fetches `path` and returns the whole response envelope.
    ///
    /// Every option except `autoPaginate` is sent as a query parameter.
    ///
    /// # Errors
    ///
    /// Returns the delegate's error unchanged, or an error if the URL is invalid.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn get(&self, path: &str, options: &QueryOptions) -> Result<Value> {
        let url = self.create_url(path)?;
        let query = options.to_query_pairs();
        self.delegate.get(&url, &query).await
    }

    /// Fetches `path` and returns `envelope[property]`.
    ///
    /// A missing property is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns the delegate's error unchanged.
    pub async fn get_with_property_filter(
        &self,
        path: &str,
        property: &str,
        options: &QueryOptions,
    ) -> Result<Option<Value>> {
        let envelope = self.get(path, options).await?;
        Ok(take_property(envelope, property))
    }

    /// Fetches every page of `path`, one request at a time.
    ///
    /// Starts at `page` (default 1) with `per_page` (default 20) and keeps
    /// requesting the next page while the response reports
    /// `count > page * per_page`. Returns the full envelope of every page in
    /// request order.
    ///
    /// # Errors
    ///
    /// Returns the first delegate error; pages fetched before it are dropped.
    /// Also fails if the page counter overflows.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn get_with_auto_pagination(
        &self,
        path: &str,
        property: &str,
        options: &QueryOptions,
    ) -> Result<Vec<Value>> {
        let mut options = options.clone();
        options.remove(AUTO_PAGINATE);

        let mut page = options
            .get(PAGE)
            .and_then(QueryValue::as_u32)
            .unwrap_or(DEFAULT_PAGE);
        options.insert(PAGE, page);
        if !options.contains_key(PER_PAGE) {
            options.insert(PER_PAGE, DEFAULT_PER_PAGE);
        }

        let mut pages: Vec<Value> = Vec::new();
        loop {
            let envelope = self.get(path, &options).await?;
            let info = PageInfo::from_envelope(&envelope, property);
            pages.push(envelope);

            tracing::info!(
                page,
                fetched = pages.len(),
                count = info.map(|i| i.count),
                "IBL page completed"
            );

            if !info.is_some_and(|i| i.has_more()) {
                break;
            }

            page = page.checked_add(1).context("page counter overflow")?;
            options.insert(PAGE, page);
        }

        Ok(pages)
    }
}

/// Removes `property` from an object envelope.
fn take_property(envelope: Value, property: &str) -> Option<Value> {
    match envelope {
        Value::Object(mut map) => map.remove(property),
        _ => None,
    }
}
