#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Overpass API client for region amenity data.
//!
//! Builds a single Overpass QL query for a bounding box that selects
//! healthcare, police, fire, school, and park facilities together with
//! highway ways (with geometry, for road length) and public transport
//! stops, sends it to the configured endpoint, and converts the response
//! elements into [`Feature`]s.
//!
//! The endpoint is defined in `services/overpass.toml`, embedded at
//! compile time (see [`service`]).

pub mod client;
pub mod query;
pub mod service;

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;
use urban_map_region_models::{Feature, LatLng};

pub use client::OverpassClient;

/// Errors from Overpass requests.
#[derive(Debug, Error)]
pub enum OverpassError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Overpass returned non-OK status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not valid Overpass JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The embedded service configuration could not be parsed.
    #[error("Invalid service config: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },
}

/// Top-level Overpass JSON response.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    /// Matched elements. Absent when the query produced no output block.
    #[serde(default)]
    pub elements: Option<Vec<OverpassElement>>,
}

/// A node, way, or relation from an Overpass response.
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    /// Element type (`"node"`, `"way"`, `"relation"`).
    #[serde(rename = "type")]
    pub element_type: Option<String>,
    /// OSM tags.
    pub tags: Option<BTreeMap<String, String>>,
    /// Inline geometry (present for ways with `out geom`).
    pub geometry: Option<Vec<GeometryNode>>,
}

/// A single vertex of an element's inline geometry.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeometryNode {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl From<OverpassElement> for Feature {
    fn from(element: OverpassElement) -> Self {
        Self {
            tags: element.tags.unwrap_or_default(),
            geometry: element
                .geometry
                .unwrap_or_default()
                .into_iter()
                .map(|node| LatLng::new(node.lat, node.lon))
                .collect(),
        }
    }
}

/// Parses an Overpass JSON body into features.
///
/// A missing `elements` array yields no features.
///
/// # Errors
///
/// Returns [`OverpassError::Json`] if the body is not valid Overpass JSON.
pub fn parse_response(body: &str) -> Result<Vec<Feature>, OverpassError> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    Ok(response
        .elements
        .unwrap_or_default()
        .into_iter()
        .map(Feature::from)
        .collect())
}

/// Turns an HTTP status and body from the interpreter into features.
///
/// # Errors
///
/// Returns [`OverpassError::Status`] for any non-2xx status, without
/// looking at the body, and [`OverpassError::Json`] if a 2xx body is not
/// valid Overpass JSON (e.g. the HTML error page some mirrors serve).
pub fn parse_http_response(status: u16, body: &str) -> Result<Vec<Feature>, OverpassError> {
    if !(200..300).contains(&status) {
        return Err(OverpassError::Status { status });
    }
    parse_response(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_elements_with_tags_and_geometry() {
        let body = serde_json::json!({
            "version": 0.6,
            "elements": [
                {
                    "type": "node",
                    "id": 1,
                    "lat": 40.0,
                    "lon": -74.0,
                    "tags": { "amenity": "hospital", "name": "General" }
                },
                {
                    "type": "way",
                    "id": 2,
                    "tags": { "highway": "residential" },
                    "geometry": [
                        { "lat": 40.0, "lon": -74.0 },
                        { "lat": 40.001, "lon": -74.0 }
                    ]
                },
                { "type": "node", "id": 3, "lat": 40.0, "lon": -74.0 }
            ]
        })
        .to_string();

        let features = parse_response(&body).unwrap();
        assert_eq!(features.len(), 3);
        assert_eq!(features[0].tag("amenity"), Some("hospital"));
        assert!(features[0].geometry.is_empty());
        assert_eq!(features[1].geometry.len(), 2);
        assert!((features[1].geometry[1].lat - 40.001).abs() < 1e-12);
        assert!(features[2].tags.is_empty());
    }

    #[test]
    fn missing_elements_yields_no_features() {
        let features = parse_response(r#"{"version": 0.6}"#).unwrap();
        assert!(features.is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        let err = parse_response("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, OverpassError::Json(_)));
    }

    #[test]
    fn error_statuses_map_to_status_error() {
        for status in [400, 429, 504] {
            let err = parse_http_response(status, r#"{"elements": []}"#).unwrap_err();
            assert!(
                matches!(err, OverpassError::Status { status: s } if s == status),
                "status {status} gave {err}"
            );
        }
    }

    #[test]
    fn html_body_with_ok_status_is_a_json_error() {
        let body = "<html><body><p>runtime error: Query timed out</p></body></html>";
        let err = parse_http_response(200, body).unwrap_err();
        assert!(matches!(err, OverpassError::Json(_)));
    }

    #[test]
    fn ok_status_parses_elements() {
        let body = r#"{"elements": [{"type": "node", "tags": {"amenity": "police"}}]}"#;
        let features = parse_http_response(200, body).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].tag("amenity"), Some("police"));
    }
}
