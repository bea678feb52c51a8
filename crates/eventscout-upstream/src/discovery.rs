//! HTTP client for the Ticketmaster Discovery API.
//!
//! A thin JSON passthrough: callers supply the path segments and query
//! parameters (including `apikey`), the client enforces a 2xx status and
//! parses the body.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::UpstreamError;

const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";

/// Path and query of one discovery call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscoveryRequest {
    segments: Vec<String>,
    params: Vec<(String, String)>,
}

impl DiscoveryRequest {
    /// Starts a request for the given path segments, e.g. `["events", id]`.
    ///
    /// Each segment is percent-encoded on its own, so an id containing `/`
    /// cannot escape its path position.
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            params: Vec::new(),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Value of the first query parameter named `key`.
    #[must_use]
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Client for the discovery REST API.
///
/// Holds one pooled `reqwest::Client` reused across requests.
pub struct DiscoveryClient {
    client: Client,
    base_url: Url,
}

impl DiscoveryClient {
    /// Creates a client pointed at the production discovery API.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, UpstreamError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`UpstreamError::InvalidBaseUrl`] if
    /// `base_url` does not parse or cannot carry path segments.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("eventscout/0.1 (event-search)")
            .build()?;

        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| UpstreamError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl(format!(
                "'{base_url}' cannot carry path segments"
            )));
        }

        Ok(Self {
            client,
            base_url: base,
        })
    }

    /// Sends a GET for `request` and returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`UpstreamError::Deserialize`] if the body is not JSON.
    pub async fn fetch(&self, request: &DiscoveryRequest) -> Result<Value, UpstreamError> {
        let url = self.build_url(request)?;
        tracing::debug!(path = url.path(), "calling discovery api");

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| UpstreamError::Deserialize {
            context: format!("discovery /{}", request.segments().join("/")),
            source: e,
        })
    }

    fn build_url(&self, request: &DiscoveryRequest) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| UpstreamError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(request.segments());

        if !request.params().is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.params() {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}
