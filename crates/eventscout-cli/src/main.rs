use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use eventscout_core::{geohash, map_events_response, Category};
use eventscout_upstream::{DiscoveryClient, DiscoveryRequest};

#[derive(Debug, Parser)]
#[command(name = "eventscout-cli")]
#[command(about = "Event search operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode a coordinate pair as a geohash.
    Geohash {
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
        #[arg(long, default_value_t = 7)]
        precision: usize,
    },
    /// List search categories and their discovery segment ids.
    Categories,
    /// Normalize a saved discovery search response (file or stdin).
    Map {
        /// Path to the JSON document; reads stdin when omitted.
        input: Option<PathBuf>,
    },
    /// Print the discovery document for one event.
    Event {
        id: String,
        #[command(flatten)]
        discovery: DiscoveryArgs,
    },
    /// Print the discovery document for one venue.
    Venue {
        id: String,
        #[command(flatten)]
        discovery: DiscoveryArgs,
    },
}

#[derive(Debug, clap::Args)]
struct DiscoveryArgs {
    #[arg(long, env = "TICKETMASTER_API_KEY", hide_env_values = true)]
    api_key: String,
    #[arg(long, env = "EVENTSCOUT_DISCOVERY_TIMEOUT_SECS", default_value_t = 15)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Geohash {
            latitude,
            longitude,
            precision,
        } => {
            println!("{}", geohash::encode(latitude, longitude, precision)?);
        }
        Commands::Categories => {
            for category in Category::ALL {
                let segment = category.segment_id();
                let segment = if segment.is_empty() { "-" } else { segment };
                println!("{:<14} {segment}", category.name());
            }
        }
        Commands::Map { input } => {
            let raw = read_input(input.as_ref())?;
            let payload: serde_json::Value =
                serde_json::from_str(&raw).context("input is not valid JSON")?;
            let events = map_events_response(&payload);
            tracing::info!(count = events.len(), "normalized events");
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        Commands::Event { id, discovery } => run_detail("events", &id, &discovery).await?,
        Commands::Venue { id, discovery } => run_detail("venues", &id, &discovery).await?,
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read stdin")?;
            Ok(raw)
        }
    }
}

async fn run_detail(resource: &str, id: &str, args: &DiscoveryArgs) -> anyhow::Result<()> {
    let client = DiscoveryClient::new(args.timeout_secs)?;
    let request = DiscoveryRequest::new([resource, id]).param("apikey", args.api_key.as_str());
    let payload = client
        .fetch(&request)
        .await
        .with_context(|| format!("discovery lookup for {resource}/{id} failed"))?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_coordinates() {
        let cli = Cli::try_parse_from(["eventscout-cli", "geohash", "40.7128", "-74.0060"])
            .expect("should parse");
        match cli.command {
            Commands::Geohash {
                latitude,
                longitude,
                precision,
            } => {
                assert!((latitude - 40.7128).abs() < f64::EPSILON);
                assert!((longitude + 74.006).abs() < f64::EPSILON);
                assert_eq!(precision, 7);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn event_accepts_explicit_api_key() {
        let cli = Cli::try_parse_from([
            "eventscout-cli",
            "event",
            "G5vYZ9",
            "--api-key",
            "tm-key",
            "--timeout-secs",
            "3",
        ])
        .expect("should parse");
        match cli.command {
            Commands::Event { id, discovery } => {
                assert_eq!(id, "G5vYZ9");
                assert_eq!(discovery.api_key, "tm-key");
                assert_eq!(discovery.timeout_secs, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn read_input_reports_missing_file() {
        let missing = PathBuf::from("/definitely/not/here.json");
        let err = read_input(Some(&missing)).expect_err("should fail");
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
