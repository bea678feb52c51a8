pub mod collaborator;
pub mod discovery;
pub mod error;
pub mod geocode;

pub use collaborator::{EventCatalog, Geocoder};
pub use discovery::{DiscoveryClient, DiscoveryRequest};
pub use error::UpstreamError;
pub use geocode::GoogleGeocoder;
