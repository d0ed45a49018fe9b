//! Road and transit summary for a region.

use urban_map_region_models::TransportMetrics;

use crate::round_to;

/// Builds the transport summary from the raw road length and stop count.
///
/// Road length is rounded to one decimal and density (km of road per km²)
/// to two. Density is `0` for non-positive areas.
#[must_use]
pub fn transport_metrics(road_km_total: f64, transit_stops: u32, area_km2: f64) -> TransportMetrics {
    let road_density_km_per_km2 = if area_km2.is_finite() && area_km2 > 0.0 {
        round_to(road_km_total / area_km2, 2)
    } else {
        0.0
    };

    TransportMetrics {
        road_km_total: round_to(road_km_total, 1),
        road_density_km_per_km2,
        transit_stops,
    }
}
