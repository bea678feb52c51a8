pub mod app_config;
pub mod category;
pub mod config;
pub mod events;
pub mod geohash;
pub mod location;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use category::{resolve_segment, Category};
pub use config::{load_app_config, load_app_config_from_env};
pub use events::{map_events_response, normalize_event, NormalizedEvent};
pub use location::{parse_literal_coordinates, GeoPoint};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum GeohashError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("geohash precision {0} is outside 1..=12")]
    InvalidPrecision(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("unrecognized category: {0:?}")]
    Unrecognized(String),
}
