use crate::app_config::{AppConfig, Environment};
use crate::geohash::MAX_PRECISION;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional =
        |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.trim().is_empty()) };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let ticketmaster_api_key = require("TICKETMASTER_API_KEY")?;
    let google_maps_api_key = optional("GOOGLE_MAPS_API_KEY");

    let env = parse_environment(&or_default("EVENTSCOUT_ENV", "development"));

    let bind_addr = or_default("EVENTSCOUT_BIND_ADDR", "0.0.0.0:5000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("EVENTSCOUT_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("EVENTSCOUT_LOG_LEVEL", "info");

    let geohash_precision = or_default("EVENTSCOUT_GEOHASH_PRECISION", "7")
        .trim()
        .parse::<usize>()
        .map_err(|e| invalid("EVENTSCOUT_GEOHASH_PRECISION", e.to_string()))?;
    if !(1..=MAX_PRECISION).contains(&geohash_precision) {
        return Err(invalid(
            "EVENTSCOUT_GEOHASH_PRECISION",
            format!("must be between 1 and {MAX_PRECISION}"),
        ));
    }

    let geocode_timeout_secs = parse_u64("EVENTSCOUT_GEOCODE_TIMEOUT_SECS", "10")?;
    let discovery_timeout_secs = parse_u64("EVENTSCOUT_DISCOVERY_TIMEOUT_SECS", "15")?;

    let templates_dir = PathBuf::from(or_default("EVENTSCOUT_TEMPLATES_DIR", "./templates"));
    let static_dir = PathBuf::from(or_default("EVENTSCOUT_STATIC_DIR", "./static"));
    let media_dir = PathBuf::from(or_default("EVENTSCOUT_MEDIA_DIR", "./media"));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        ticketmaster_api_key,
        google_maps_api_key,
        geohash_precision,
        geocode_timeout_secs,
        discovery_timeout_secs,
        templates_dir,
        static_dir,
        media_dir,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s.trim() {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
