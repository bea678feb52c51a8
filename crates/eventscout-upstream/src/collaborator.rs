//! Object-safe seams over the upstream clients.
//!
//! The search orchestrator holds these as `Arc<dyn _>` so tests can swap in
//! in-memory fakes for the real HTTP clients.

use eventscout_core::GeoPoint;
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

use crate::discovery::{DiscoveryClient, DiscoveryRequest};
use crate::error::UpstreamError;
use crate::geocode::GoogleGeocoder;

/// Resolves free-text addresses to coordinates.
pub trait Geocoder: Send + Sync {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<GeoPoint, UpstreamError>>;
}

/// Fetches raw JSON documents from the event-discovery provider.
pub trait EventCatalog: Send + Sync {
    fn fetch<'a>(
        &'a self,
        request: &'a DiscoveryRequest,
    ) -> BoxFuture<'a, Result<Value, UpstreamError>>;
}

impl Geocoder for GoogleGeocoder {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<GeoPoint, UpstreamError>> {
        self.geocode_address(address).boxed()
    }
}

impl EventCatalog for DiscoveryClient {
    fn fetch<'a>(
        &'a self,
        request: &'a DiscoveryRequest,
    ) -> BoxFuture<'a, Result<Value, UpstreamError>> {
        DiscoveryClient::fetch(self, request).boxed()
    }
}
