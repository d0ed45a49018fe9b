#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Place-name search for the map's search box.
//!
//! Resolves a free-text query to a handful of candidate locations using the
//! public Nominatim / `OpenStreetMap` search endpoint. The map widget pans
//! to whichever result the user picks; nothing here depends on the region
//! analysis.
//!
//! The public Nominatim instance allows at most **1 request per second**.
//! Callers are expected to debounce keystrokes.

pub mod nominatim;
pub mod service;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A search hit in the shape the map search control expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoSearchResult {
    /// Longitude (WGS84).
    pub x: f64,
    /// Latitude (WGS84).
    pub y: f64,
    /// Display name of the matched place.
    pub label: String,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Nominatim returned non-OK status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The embedded service configuration could not be parsed.
    #[error("Invalid service config: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },
}
