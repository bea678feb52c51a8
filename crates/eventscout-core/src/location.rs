use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::geohash;
use crate::GeohashError;

/// Matches a literal `"<lat>,<lon>"` pair such as `"40.7128, -74.0060"`.
static LITERAL_COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*$")
        .expect("valid literal coordinate regex")
});

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Builds a point, rejecting coordinates outside the valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`GeohashError::LatitudeOutOfRange`] or
    /// [`GeohashError::LongitudeOutOfRange`] for non-finite or out-of-range
    /// values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeohashError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeohashError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeohashError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Geohash of this point at the given precision.
    ///
    /// # Errors
    ///
    /// Returns [`GeohashError::InvalidPrecision`] if `precision` is not in
    /// `1..=12`.
    pub fn geohash(&self, precision: usize) -> Result<String, GeohashError> {
        geohash::encode(self.latitude, self.longitude, precision)
    }
}

/// Parses a literal coordinate pair.
///
/// Returns `None` when `input` is not shaped like `"<lat>,<lon>"` (plain
/// decimal numbers, optional leading minus, optional whitespace). In that case
/// the caller should treat the input as a free-text address. A correctly
/// shaped pair with out-of-range values returns `Some(Err(_))`.
#[must_use]
pub fn parse_literal_coordinates(input: &str) -> Option<Result<GeoPoint, GeohashError>> {
    let captures = LITERAL_COORDINATES.captures(input)?;
    let latitude = captures.get(1)?.as_str().parse::<f64>().ok()?;
    let longitude = captures.get(2)?.as_str().parse::<f64>().ok()?;
    Some(GeoPoint::new(latitude, longitude))
}
