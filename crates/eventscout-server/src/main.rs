mod api;
mod middleware;
mod search;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use eventscout_upstream::{DiscoveryClient, GoogleGeocoder};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState, AssetDirs},
    search::SearchOrchestrator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = eventscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.google_maps_api_key.is_none() {
        tracing::warn!(
            "GOOGLE_MAPS_API_KEY not set; only literal \"lat,lon\" locations can be searched"
        );
    }

    let geocoder = GoogleGeocoder::new(
        config.google_maps_api_key.as_deref(),
        config.geocode_timeout_secs,
    )?;
    let catalog = DiscoveryClient::new(config.discovery_timeout_secs)?;
    let search = SearchOrchestrator::new(
        Arc::new(geocoder),
        Arc::new(catalog),
        config.ticketmaster_api_key.clone(),
        config.geohash_precision,
    );

    let app = build_app(
        AppState {
            search: Arc::new(search),
        },
        &AssetDirs::from_config(&config),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "eventscout-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
