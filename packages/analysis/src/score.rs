//! Infrastructure readiness score.
//!
//! Compares facility counts against ideal densities per 10 km² and
//! averages the per-category coverage into a 0-100 score. Parks are shown
//! to the user but do not feed the score.

use urban_map_region_models::{AmenityCategory, AmenityCounts};

/// Area unit the ideal counts are expressed against, in km².
pub const REFERENCE_AREA_KM2: f64 = 10.0;

/// Ideal facility counts per [`REFERENCE_AREA_KM2`].
pub const IDEAL_COUNTS: &[(AmenityCategory, f64)] = &[
    (AmenityCategory::Hospital, 2.0),
    (AmenityCategory::Police, 1.0),
    (AmenityCategory::FireStation, 1.0),
    (AmenityCategory::School, 5.0),
];

/// Coverage of one category in percent, capped at 100.
fn category_score(actual: u32, ideal: f64, normalized: f64) -> f64 {
    (f64::from(actual) / (ideal * normalized) * 100.0).min(100.0)
}

/// Computes the 0-100 readiness score for a region of `area_km2` with the
/// given `counts`.
///
/// Returns `0` for non-positive or non-finite areas.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn score(area_km2: f64, counts: &AmenityCounts) -> u32 {
    if !area_km2.is_finite() || area_km2 <= 0.0 {
        return 0;
    }

    let normalized = area_km2 / REFERENCE_AREA_KM2;
    let total: f64 = IDEAL_COUNTS
        .iter()
        .map(|(category, ideal)| category_score(counts.get(*category), *ideal, normalized))
        .sum();
    let mean = total / IDEAL_COUNTS.len() as f64;

    mean.round().clamp(0.0, 100.0) as u32
}
