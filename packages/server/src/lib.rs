#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the urban map region statistics.
//!
//! Exposes the region analysis engine and the place search to the map
//! frontend. Every `POST /api/analyze` call is independent; the
//! stale-result handling lives with the caller that owns the selection.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use thiserror::Error;
use urban_map_analysis::{AnalysisError, RegionAnalyzer};
use urban_map_geocoder::{GeocodeError, nominatim::NominatimClient};

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The region analyzer could not be built.
    #[error("Analyzer setup failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// The place search client could not be built.
    #[error("Geocoder setup failed: {0}")]
    Geocode(#[from] GeocodeError),

    /// Binding or running the HTTP server failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// Region analysis engine.
    pub analyzer: RegionAnalyzer,
    /// Place search client.
    pub geocoder: NominatimClient,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_addr: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR` and `PORT`, falling back to `127.0.0.1:8080`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        Self { bind_addr, port }
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/analyze", web::post().to(handlers::analyze))
            .route("/geosearch", web::get().to(handlers::geosearch)),
    );
}

/// Initializes logging from `RUST_LOG` and starts the server with the
/// configuration from the environment.
///
/// # Errors
///
/// Returns [`ServerError`] if the clients cannot be built or the server
/// fails to bind.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> Result<(), ServerError> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    serve(ServerConfig::from_env()).await
}

/// Starts the Actix-Web HTTP server.
///
/// Does not touch logging, so callers that already installed a logger can
/// use it directly. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError`] if the clients cannot be built or the server
/// fails to bind.
#[allow(clippy::future_not_send)]
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let analyzer = RegionAnalyzer::from_env()?;
    let geocoder = NominatimClient::from_env()?;
    log::debug!("Using analyzer {analyzer:?}");

    let state = web::Data::new(AppState { analyzer, geocoder });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await?;

    Ok(())
}
