#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the urban map toolchain.
//!
//! Analyzes a rectangle or circle straight from the terminal, searches
//! for places, or starts the API server.
//!
//! Uses `indicatif-log-bridge` (via [`urban_map_cli_utils::init_logger`])
//! so the spinner shown while an analysis is loading never fights with
//! log output.

use clap::{Parser, Subcommand};
use urban_map_analysis::{AnalysisSession, RegionAnalyzer, SessionSnapshot};
use urban_map_cli_utils::{MultiProgress, Spinner};
use urban_map_geocoder::nominatim::NominatimClient;
use urban_map_region_models::{LatLng, RegionSelection};
use urban_map_server::ServerConfig;

#[derive(Parser)]
#[command(name = "urban_map", about = "Urban map region statistics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute statistics for a region
    Analyze {
        #[command(subcommand)]
        shape: Shape,
    },
    /// Search for a place by name
    Search {
        /// Free-text place query
        query: String,
    },
    /// Start the API server
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Subcommand)]
enum Shape {
    /// Rectangle given by two opposite corners
    Rect {
        /// First corner as LAT,LNG
        #[arg(value_parser = parse_lat_lng, allow_hyphen_values = true)]
        corner1: LatLng,
        /// Opposite corner as LAT,LNG
        #[arg(value_parser = parse_lat_lng, allow_hyphen_values = true)]
        corner2: LatLng,
    },
    /// Circle given by its center and radius
    Circle {
        /// Center as LAT,LNG
        #[arg(value_parser = parse_lat_lng, allow_hyphen_values = true)]
        center: LatLng,
        /// Radius in meters
        #[arg(long)]
        radius: f64,
    },
}

impl From<Shape> for RegionSelection {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Rect { corner1, corner2 } => Self::Rectangle { corner1, corner2 },
            Shape::Circle { center, radius } => Self::Circle {
                center,
                radius_meters: radius,
            },
        }
    }
}

/// Parses `"LAT,LNG"` into a [`LatLng`].
fn parse_lat_lng(value: &str) -> Result<LatLng, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {value:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude {lat:?}: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude {lng:?}: {e}"))?;
    Ok(LatLng::new(lat, lng))
}

async fn analyze(
    multi: &MultiProgress,
    selection: RegionSelection,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = RegionAnalyzer::from_env()?;
    let session = AnalysisSession::new();

    let spinner = Spinner::start(multi, "Analyzing region...");
    let stored = session.run(&analyzer, selection).await;
    spinner.finish(if stored {
        "Analysis complete"
    } else {
        "Analysis discarded"
    });

    if let Some(json) = render_snapshot(&session.snapshot())? {
        println!("{json}");
    }

    Ok(())
}

/// Pretty JSON for the snapshot's analysis, or `None` (with a warning)
/// when no analysis was stored for the current selection.
fn render_snapshot(snapshot: &SessionSnapshot) -> Result<Option<String>, serde_json::Error> {
    log::debug!(
        "Selection {:?} finished (loading: {})",
        snapshot.selection_id,
        snapshot.loading
    );
    let Some(analysis) = &snapshot.analysis else {
        log::warn!(
            "No analysis stored for selection {:?}",
            snapshot.selection_id
        );
        return Ok(None);
    };
    serde_json::to_string_pretty(analysis).map(Some)
}

async fn search(multi: &MultiProgress, query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = NominatimClient::from_env()?;

    let spinner = Spinner::start(multi, &format!("Searching for {query:?}..."));
    let results = client.search(query).await;
    spinner.finish_and_clear();

    println!("{}", serde_json::to_string_pretty(&results?)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = urban_map_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { shape } => analyze(&multi, shape.into()).await?,
        Commands::Search { query } => search(&multi, &query).await?,
        Commands::Serve { bind, port } => {
            let config = ServerConfig {
                bind_addr: bind,
                port,
            };
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(urban_map_server::serve(config))
            })
            .await??;
        }
    }

    Ok(())
}
