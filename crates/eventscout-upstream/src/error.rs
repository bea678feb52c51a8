use thiserror::Error;

/// Errors returned by the geocoding and event-discovery clients.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network, TLS, timeout, or non-2xx status from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The geocoding provider answered with a non-`OK` status or no results.
    #[error("geocoding failed: {0}")]
    GeocodeStatus(String),

    /// The geocoding provider answered `OK` but without a usable location.
    #[error("malformed geocoding result: {0}")]
    MalformedGeocode(String),

    /// A client was asked to call a provider it has no credentials for.
    #[error("missing {0}")]
    MissingApiKey(&'static str),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
