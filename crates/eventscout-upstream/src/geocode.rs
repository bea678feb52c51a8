//! HTTP client for the Google Maps Geocoding API.
//!
//! Resolves a free-text address to the first result's coordinates. A non-2xx
//! HTTP status, a provider `status` other than `"OK"`, or an empty result list
//! all surface as errors; nothing is retried.

use std::time::Duration;

use eventscout_core::GeoPoint;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::UpstreamError;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";
const GEOCODE_PATH: &str = "maps/api/geocode/json";
const API_KEY_NAME: &str = "GOOGLE_MAPS_API_KEY";

/// Client for the geocoding endpoint.
///
/// The API key is optional at construction so the server can still answer
/// searches with literal coordinates when no key is configured; geocoding a
/// free-text address without a key fails with [`UpstreamError::MissingApiKey`].
pub struct GoogleGeocoder {
    client: Client,
    api_key: Option<String>,
    endpoint: Url,
}

impl GoogleGeocoder {
    /// Creates a client pointed at the production geocoding API.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: Option<&str>, timeout_secs: u64) -> Result<Self, UpstreamError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`UpstreamError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("eventscout/0.1 (geocoding)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(GEOCODE_PATH))
            .map_err(|e| UpstreamError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.map(str::to_owned),
            endpoint,
        })
    }

    /// Geocodes `address` to the coordinates of the first result.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::MissingApiKey`] if no API key was configured.
    /// - [`UpstreamError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`UpstreamError::Deserialize`] if the body is not JSON.
    /// - [`UpstreamError::GeocodeStatus`] if the provider status is not `"OK"`
    ///   or there are no results.
    /// - [`UpstreamError::MalformedGeocode`] if the first result has no
    ///   usable location.
    pub async fn geocode_address(&self, address: &str) -> Result<GeoPoint, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingApiKey(API_KEY_NAME))?;

        let url = self.build_url(api_key, address);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Deserialize {
                context: format!("geocode(address={address})"),
                source: e,
            })?;

        let point = parse_first_location(&payload)?;
        tracing::debug!(
            address,
            latitude = point.latitude(),
            longitude = point.longitude(),
            "geocoded address"
        );
        Ok(point)
    }

    fn build_url(&self, api_key: &str, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", api_key);
        url
    }
}

/// Reads `results[0].geometry.location` after checking the provider status.
fn parse_first_location(payload: &Value) -> Result<GeoPoint, UpstreamError> {
    let status = payload.get("status").and_then(Value::as_str);
    let first = payload
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first());

    let first = match (status, first) {
        (Some("OK"), Some(first)) => first,
        (Some("OK"), None) => return Err(UpstreamError::GeocodeStatus("no results".to_string())),
        (other, _) => {
            return Err(UpstreamError::GeocodeStatus(
                other.unwrap_or("missing status").to_string(),
            ))
        }
    };

    let location = first
        .get("geometry")
        .and_then(|geometry| geometry.get("location"))
        .ok_or_else(|| UpstreamError::MalformedGeocode("result has no location".to_string()))?;

    let coordinate = |key: &str| {
        location
            .get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| UpstreamError::MalformedGeocode(format!("location has no {key}")))
    };

    GeoPoint::new(coordinate("lat")?, coordinate("lng")?)
        .map_err(|e| UpstreamError::MalformedGeocode(e.to_string()))
}
