#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region selection and analysis result types.
//!
//! These types describe what the user drew on the map (a
//! [`RegionSelection`]), the canonical [`BoundingBox`] derived from it,
//! the raw [`Feature`]s returned by the geodata service, and the
//! [`RegionAnalysis`] handed back to the presentation layer. All of them
//! serialize with `camelCase` field names to match the frontend contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl LatLng {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An axis-aligned bounding box in WGS84 coordinates.
///
/// Always satisfies `min_lat <= max_lat` and `min_lng <= max_lng` when
/// built through [`BoundingBox::from_corners`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Southern latitude boundary.
    pub min_lat: f64,
    /// Western longitude boundary.
    pub min_lng: f64,
    /// Northern latitude boundary.
    pub max_lat: f64,
    /// Eastern longitude boundary.
    pub max_lng: f64,
}

impl BoundingBox {
    /// Creates a bounding box from two arbitrary corners, taking the
    /// per-axis minimum and maximum.
    #[must_use]
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            min_lat: a.lat.min(b.lat),
            min_lng: a.lng.min(b.lng),
            max_lat: a.lat.max(b.lat),
            max_lng: a.lng.max(b.lng),
        }
    }

    /// Latitude span in degrees.
    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude span in degrees.
    #[must_use]
    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Renders the box as `minLat,minLng,maxLat,maxLng`, the order the
    /// Overpass bbox filter expects.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lat, self.min_lng, self.max_lat, self.max_lng
        )
    }
}

/// The region the user drew on the map.
///
/// Immutable once created. A new draw replaces the selection wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "shape",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum RegionSelection {
    /// A rectangle given by two opposite corners (in any order).
    Rectangle {
        /// First corner.
        corner1: LatLng,
        /// Opposite corner.
        corner2: LatLng,
    },
    /// A circle given by its center and radius.
    Circle {
        /// Center point.
        center: LatLng,
        /// Radius in meters.
        radius_meters: f64,
    },
}

/// An amenity category tracked for a region.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AmenityCategory {
    /// Hospitals, clinics, doctors, and pharmacies.
    Hospital,
    /// Police stations.
    Police,
    /// Fire stations.
    FireStation,
    /// Schools.
    School,
    /// Parks. Displayed, but not a readiness score input.
    Park,
}

impl AmenityCategory {
    /// Returns all categories in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Hospital,
            Self::Police,
            Self::FireStation,
            Self::School,
            Self::Park,
        ]
    }
}

/// Per-category amenity counts for a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityCounts {
    /// Hospitals, clinics, doctors, and pharmacies.
    pub hospitals: u32,
    /// Police stations.
    pub police: u32,
    /// Fire stations.
    pub fire_stations: u32,
    /// Schools.
    pub schools: u32,
    /// Parks.
    pub parks: u32,
}

impl AmenityCounts {
    /// Increments the counter for `category` by one.
    pub fn record(&mut self, category: AmenityCategory) {
        match category {
            AmenityCategory::Hospital => self.hospitals += 1,
            AmenityCategory::Police => self.police += 1,
            AmenityCategory::FireStation => self.fire_stations += 1,
            AmenityCategory::School => self.schools += 1,
            AmenityCategory::Park => self.parks += 1,
        }
    }

    /// Returns the count for `category`.
    #[must_use]
    pub const fn get(&self, category: AmenityCategory) -> u32 {
        match category {
            AmenityCategory::Hospital => self.hospitals,
            AmenityCategory::Police => self.police,
            AmenityCategory::FireStation => self.fire_stations,
            AmenityCategory::School => self.schools,
            AmenityCategory::Park => self.parks,
        }
    }
}

/// Road and public transport summary for a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportMetrics {
    /// Total length of all highway ways, in kilometers.
    pub road_km_total: f64,
    /// Road kilometers per square kilometer of area.
    pub road_density_km_per_km2: f64,
    /// Number of bus, rail, and public transport stops.
    pub transit_stops: u32,
}

/// Current population estimate and compound-growth projections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationProjection {
    /// Estimated current population.
    pub current: i64,
    /// Annual growth rate in percent.
    pub growth_rate_percent: f64,
    /// Projected population in five years.
    #[serde(rename = "projected5Year")]
    pub projected_5_year: i64,
    /// Projected population in ten years.
    #[serde(rename = "projected10Year")]
    pub projected_10_year: i64,
}

/// A single element returned by the geodata service, reduced to the parts
/// the analysis reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// OSM tags (`amenity`, `leisure`, `highway`, ...).
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Way geometry, empty for nodes and for elements without geometry.
    #[serde(default)]
    pub geometry: Vec<LatLng>,
}

impl Feature {
    /// Returns the value of tag `key`, if present.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// The complete statistics for one selected region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAnalysis {
    /// Area in square kilometers, rounded to two decimals.
    pub area_km2: f64,
    /// Amenity counts.
    pub amenities: AmenityCounts,
    /// Infrastructure readiness score, 0-100.
    pub infra_score: u32,
    /// Population projection, absent for degenerate regions or when the
    /// geodata query failed.
    pub population: Option<PopulationProjection>,
    /// Road and transit summary.
    pub transport: TransportMetrics,
}
