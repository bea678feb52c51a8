//! Search orchestration: request validation, location resolution, and the
//! discovery calls behind the HTTP handlers.

use std::sync::Arc;

use eventscout_core::{
    map_events_response, parse_literal_coordinates, resolve_segment, NormalizedEvent,
};
use eventscout_upstream::{DiscoveryRequest, EventCatalog, Geocoder};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

const DISTANCE_UNIT: &str = "miles";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Missing or invalid request parameter.
    #[error("{0}")]
    Validation(String),

    /// The free-text location could not be geocoded.
    #[error("{0}")]
    Geocoding(String),

    /// The discovery provider failed.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

/// Raw query string of `GET /search/events`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub distance: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
}

/// A validated event search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub keyword: String,
    pub distance: u32,
    /// Empty when no segment filter applies.
    pub segment_id: &'static str,
    pub location: String,
}

impl SearchParams {
    /// Validates the raw query in the order keyword, distance, location, category.
    ///
    /// An absent or empty `category` means no segment filter; any other value
    /// must name a known category.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] describing the first invalid field.
    pub fn from_query(query: &SearchQuery) -> Result<Self, SearchError> {
        let keyword = query.keyword.as_deref().unwrap_or_default().trim();
        if keyword.is_empty() {
            return Err(SearchError::Validation("keyword is required".to_string()));
        }

        let distance = query
            .distance
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|d| *d > 0)
            .ok_or_else(|| {
                SearchError::Validation("distance must be a positive integer".to_string())
            })?;

        let location = query.location.as_deref().unwrap_or_default().trim();
        if location.is_empty() {
            return Err(SearchError::Validation("location is required".to_string()));
        }

        let segment_id = match query.category.as_deref() {
            None | Some("") => "",
            category => resolve_segment(category)
                .map_err(|_| SearchError::Validation("valid category is required".to_string()))?,
        };

        Ok(Self {
            keyword: keyword.to_string(),
            distance,
            segment_id,
            location: location.to_string(),
        })
    }
}

/// Stateless coordinator over the geocoding and discovery collaborators.
pub struct SearchOrchestrator {
    geocoder: Arc<dyn Geocoder>,
    catalog: Arc<dyn EventCatalog>,
    api_key: String,
    geohash_precision: usize,
}

impl SearchOrchestrator {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        catalog: Arc<dyn EventCatalog>,
        api_key: impl Into<String>,
        geohash_precision: usize,
    ) -> Self {
        Self {
            geocoder,
            catalog,
            api_key: api_key.into(),
            geohash_precision,
        }
    }

    /// Resolves the location, runs the discovery search, and normalizes the
    /// events.
    ///
    /// A literal `"<lat>,<lon>"` location skips the geocoder entirely.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Validation`] for out-of-range literal coordinates.
    /// - [`SearchError::Geocoding`] if the address cannot be geocoded.
    /// - [`SearchError::Upstream`] if the discovery call fails.
    pub async fn search_events(
        &self,
        params: &SearchParams,
    ) -> Result<Vec<NormalizedEvent>, SearchError> {
        let geo_point = self.resolve_geohash(&params.location).await?;
        let request = self.events_request(params, &geo_point);

        let payload = self.catalog.fetch(&request).await.map_err(|e| {
            tracing::warn!(error = %e, "discovery event search failed");
            SearchError::Upstream(format!("discovery api error: {e}"))
        })?;

        let events = map_events_response(&payload);
        tracing::debug!(count = events.len(), "mapped discovery events");
        Ok(events)
    }

    /// Passthrough of the discovery document for one event.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Upstream`] if the discovery call fails.
    pub async fn event_detail(&self, event_id: &str) -> Result<Value, SearchError> {
        self.detail("events", event_id).await
    }

    /// Passthrough of the discovery document for one venue.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Upstream`] if the discovery call fails.
    pub async fn venue_detail(&self, venue_id: &str) -> Result<Value, SearchError> {
        self.detail("venues", venue_id).await
    }

    async fn detail(&self, resource: &str, id: &str) -> Result<Value, SearchError> {
        let request = DiscoveryRequest::new([resource, id]).param("apikey", self.api_key.as_str());
        self.catalog.fetch(&request).await.map_err(|e| {
            tracing::warn!(error = %e, resource, id, "discovery detail lookup failed");
            SearchError::Upstream(format!("discovery api error: {e}"))
        })
    }

    async fn resolve_geohash(&self, location: &str) -> Result<String, SearchError> {
        let point = match parse_literal_coordinates(location) {
            Some(Ok(point)) => {
                tracing::debug!("using literal coordinates");
                point
            }
            Some(Err(e)) => {
                return Err(SearchError::Validation(format!("invalid location: {e}")));
            }
            None => {
                tracing::debug!("geocoding free-text location");
                self.geocoder.geocode(location).await.map_err(|e| {
                    tracing::warn!(error = %e, "geocoding failed");
                    SearchError::Geocoding(format!("failed to geocode location: {e}"))
                })?
            }
        };

        point
            .geohash(self.geohash_precision)
            .map_err(|e| SearchError::Internal(e.to_string()))
    }

    fn events_request(&self, params: &SearchParams, geo_point: &str) -> DiscoveryRequest {
        let request = DiscoveryRequest::new(["events"])
            .param("apikey", self.api_key.as_str())
            .param("unit", DISTANCE_UNIT)
            .param("radius", params.distance.to_string())
            .param("keyword", params.keyword.as_str())
            .param("geoPoint", geo_point);

        if params.segment_id.is_empty() {
            request
        } else {
            request.param("segmentId", params.segment_id)
        }
    }
}
