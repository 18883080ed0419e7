//! `HttpDelegate` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use serde_json::Value;
use url::Url;

/// Transport capability injected into the request layer.
///
/// Implementations perform a GET against `url` with the given query pairs and
/// return the decoded JSON body. Non-2xx responses and network failures must be
/// returned as errors; the request layer propagates them unchanged.
/// Timeouts, retries and caching, if any, belong here.
///
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(HttpDelegate: Send)]
pub trait LocalHttpDelegate {
    /// Performs a GET request and decodes the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response status is not
    /// successful, or the body is not valid JSON.
    async fn get(&self, url: &Url, query: &[(String, String)]) -> Result<Value>;
}
