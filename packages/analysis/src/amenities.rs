//! Tag-based classification and aggregation of geodata features.
//!
//! Every category is tested independently against a feature's tags, so a
//! feature may count towards zero, one, or several categories. Features
//! are counted per element: a facility mapped both as a relation and as
//! its member way is counted twice.

use urban_map_geometry::polyline_length_km;
use urban_map_region_models::{AmenityCategory, AmenityCounts, Feature};

/// `amenity` values counted as hospitals.
pub const HEALTHCARE_AMENITIES: &[&str] = &["hospital", "clinic", "doctors", "pharmacy"];

/// `railway` values counted as transit stops.
pub const RAIL_STOP_VALUES: &[&str] = &["station", "halt", "stop"];

/// `public_transport` values counted as transit stops.
pub const PUBLIC_TRANSPORT_STOP_VALUES: &[&str] = &["stop_position", "platform"];

/// Returns whether `feature` belongs to `category`.
#[must_use]
pub fn matches_category(feature: &Feature, category: AmenityCategory) -> bool {
    let amenity = feature.tag("amenity");
    match category {
        AmenityCategory::Hospital => amenity.is_some_and(|v| HEALTHCARE_AMENITIES.contains(&v)),
        AmenityCategory::Police => amenity == Some("police"),
        AmenityCategory::FireStation => amenity == Some("fire_station"),
        AmenityCategory::School => amenity == Some("school"),
        AmenityCategory::Park => feature.tag("leisure") == Some("park"),
    }
}

/// Returns every category `feature` belongs to.
#[must_use]
pub fn categories_of(feature: &Feature) -> Vec<AmenityCategory> {
    AmenityCategory::all()
        .iter()
        .copied()
        .filter(|category| matches_category(feature, *category))
        .collect()
}

/// Any `highway` tag marks a road, whatever its value.
#[must_use]
pub fn is_road(feature: &Feature) -> bool {
    feature.tags.contains_key("highway")
}

/// Returns whether `feature` is a bus, rail, or public transport stop.
#[must_use]
pub fn is_transit_stop(feature: &Feature) -> bool {
    let bus_stop = feature.tag("highway") == Some("bus_stop");
    let rail_stop = feature
        .tag("railway")
        .is_some_and(|v| RAIL_STOP_VALUES.contains(&v));
    let pt_stop = feature
        .tag("public_transport")
        .is_some_and(|v| PUBLIC_TRANSPORT_STOP_VALUES.contains(&v));
    bus_stop || rail_stop || pt_stop
}

/// Counts and totals reduced from a feature list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureSummary {
    /// Per-category amenity counts.
    pub counts: AmenityCounts,
    /// Unrounded total road length in kilometers.
    pub road_km_total: f64,
    /// Number of transit stops.
    pub transit_stops: u32,
}

/// Reduces `features` to amenity counts, road length, and transit stops in
/// a single pass.
#[must_use]
pub fn aggregate(features: &[Feature]) -> FeatureSummary {
    let mut summary = FeatureSummary::default();

    for feature in features {
        for category in categories_of(feature) {
            summary.counts.record(category);
        }
        if is_road(feature) {
            summary.road_km_total += polyline_length_km(&feature.geometry);
        }
        if is_transit_stop(feature) {
            summary.transit_stops += 1;
        }
    }

    summary
}
