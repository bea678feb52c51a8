use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub ticketmaster_api_key: String,
    pub google_maps_api_key: Option<String>,
    pub geohash_precision: usize,
    pub geocode_timeout_secs: u64,
    pub discovery_timeout_secs: u64,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    pub media_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("ticketmaster_api_key", &"[redacted]")
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("geohash_precision", &self.geohash_precision)
            .field("geocode_timeout_secs", &self.geocode_timeout_secs)
            .field("discovery_timeout_secs", &self.discovery_timeout_secs)
            .field("templates_dir", &self.templates_dir)
            .field("static_dir", &self.static_dir)
            .field("media_dir", &self.media_dir)
            .finish()
    }
}
