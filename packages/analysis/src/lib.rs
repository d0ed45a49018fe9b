#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region statistics engine.
//!
//! Turns a user-drawn [`RegionSelection`](urban_map_region_models::RegionSelection)
//! into a [`RegionAnalysis`](urban_map_region_models::RegionAnalysis):
//!
//! 1. [`urban_map_geometry`] computes the bounding box and flat-Earth area.
//! 2. A [`FeatureSource`] (normally the Overpass API) returns the raw
//!    features inside the box, which [`amenities::aggregate`] reduces to
//!    counts, road length, and transit stops.
//! 3. [`score::score`] and [`population::project`] derive the readiness
//!    score and population estimate from the area and counts.
//!
//! [`RegionAnalyzer`] runs these steps for one selection and never fails:
//! a missing or broken data source degrades to a zero-valued result.
//! [`AnalysisSession`] holds the single "current analysis" slot for a
//! caller and discards results that arrive for superseded selections.

pub mod amenities;
pub mod analyzer;
#[cfg(test)]
mod fixtures;
pub mod population;
pub mod score;
pub mod session;
pub mod source;
pub mod transport;

use thiserror::Error;
use urban_map_overpass::OverpassError;

pub use analyzer::RegionAnalyzer;
pub use session::{AnalysisSession, SelectionTicket, SessionSnapshot};
pub use source::FeatureSource;

/// Errors from fetching region features.
///
/// These never escape [`RegionAnalyzer::analyze`]; they are logged and
/// turned into a degraded result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The Overpass request failed.
    #[error("Overpass error: {0}")]
    Overpass(#[from] OverpassError),

    /// The feature request did not finish within the timeout.
    #[error("Feature request timed out after {millis}ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds.
        millis: u128,
    },

    /// Any other feature source failure.
    #[error("Feature source unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

/// Rounds `value` to `places` decimal places, half away from zero.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
