//! Illustrative population estimate for a region.
//!
//! A pure function of area: a fixed urban density and a fixed annual
//! growth rate compounded over five and ten years. Not calibrated against
//! any demographic data.

use urban_map_region_models::PopulationProjection;

/// Assumed residents per km².
pub const DENSITY_PER_KM2: f64 = 2500.0;

/// Assumed annual growth rate in percent.
pub const GROWTH_RATE_PERCENT: f64 = 2.5;

/// Projects the population of a region of `area_km2`.
///
/// Returns `None` for non-positive or non-finite areas. Only the final
/// values are rounded (half away from zero); growth is compounded on the
/// rounded current population.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn project(area_km2: f64) -> Option<PopulationProjection> {
    if !area_km2.is_finite() || area_km2 <= 0.0 {
        return None;
    }

    let current = (area_km2 * DENSITY_PER_KM2).round();
    let growth = 1.0 + GROWTH_RATE_PERCENT / 100.0;

    Some(PopulationProjection {
        current: current as i64,
        growth_rate_percent: GROWTH_RATE_PERCENT,
        projected_5_year: (current * growth.powi(5)).round() as i64,
        projected_10_year: (current * growth.powi(10)).round() as i64,
    })
}
