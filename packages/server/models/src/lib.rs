#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the urban map server.
//!
//! The analysis result itself is
//! [`RegionAnalysis`](urban_map_region_models::RegionAnalysis); this crate
//! only holds the envelope types around it.

use serde::{Deserialize, Serialize};
use urban_map_region_models::{LatLng, RegionSelection};

/// Body of `POST /api/analyze`.
///
/// Accepts either a tagged [`RegionSelection`] or the bare
/// `[[lat1, lng1], [lat2, lng2]]` rectangle bounds the map widget reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiAnalyzeRequest {
    /// A rectangle or circle selection.
    Selection(RegionSelection),
    /// Two rectangle corners as `[lat, lng]` pairs.
    Bounds {
        /// Corner coordinates.
        bounds: Vec<Vec<f64>>,
    },
}

impl ApiAnalyzeRequest {
    /// Converts the request into a selection.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBoundsError`] unless `bounds` holds exactly two
    /// pairs of two numbers.
    pub fn into_selection(self) -> Result<RegionSelection, InvalidBoundsError> {
        match self {
            Self::Selection(selection) => Ok(selection),
            Self::Bounds { bounds } => match bounds.as_slice() {
                [a, b] if a.len() == 2 && b.len() == 2 => Ok(RegionSelection::Rectangle {
                    corner1: LatLng::new(a[0], a[1]),
                    corner2: LatLng::new(b[0], b[1]),
                }),
                _ => Err(InvalidBoundsError),
            },
        }
    }
}

/// Error returned when request bounds are not two `[lat, lng]` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidBoundsError;

impl std::fmt::Display for InvalidBoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Invalid bounds: expected [[lat1, lng1], [lat2, lng2]]")
    }
}

impl std::error::Error for InvalidBoundsError {}

/// Query parameters for `GET /api/geosearch`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoSearchParams {
    /// Free-text place query.
    #[serde(default)]
    pub q: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}
