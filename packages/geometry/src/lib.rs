#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometry helpers for user-drawn regions.
//!
//! Converts a [`RegionSelection`] into a canonical [`BoundingBox`],
//! estimates its area with a flat-Earth approximation (1 degree ≈ 111 km
//! on both axes), and measures way geometry with the haversine formula.
//!
//! The area estimate is not geodesic. Error grows with
//! latitude and with the size of the box.

use geo::{Coord, Rect};
use urban_map_region_models::{BoundingBox, LatLng, RegionSelection};

/// Kilometers per degree used by [`area_km2`] on both axes.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Meters per degree used to turn a circle radius into a degree offset.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Computes the bounding box enclosing `selection`.
///
/// Rectangles take the per-axis min/max of their corners. Circles expand
/// the center by `radius_meters / 111320` degrees on both axes.
#[must_use]
pub fn bounding_box_of(selection: &RegionSelection) -> BoundingBox {
    let rect = match *selection {
        RegionSelection::Rectangle { corner1, corner2 } => {
            Rect::new(to_coord(corner1), to_coord(corner2))
        }
        RegionSelection::Circle {
            center,
            radius_meters,
        } => {
            if radius_meters < 0.0 {
                log::debug!("Negative circle radius {radius_meters}m, using its magnitude");
            }
            let offset = radius_meters.abs() / METERS_PER_DEGREE;
            let offset = Coord {
                x: offset,
                y: offset,
            };
            let center = to_coord(center);
            Rect::new(center - offset, center + offset)
        }
    };
    from_rect(rect)
}

/// Flat-Earth area of `bbox` in square kilometers.
///
/// Returns `0.0` for degenerate or inverted boxes and never returns a
/// negative value.
#[must_use]
pub fn area_km2(bbox: &BoundingBox) -> f64 {
    if bbox.lat_span() <= 0.0 || bbox.lng_span() <= 0.0 {
        return 0.0;
    }
    let rect = to_rect(bbox);
    (rect.height() * KM_PER_DEGREE) * (rect.width() * KM_PER_DEGREE)
}

/// Great-circle distance between two points in kilometers.
#[must_use]
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Total haversine length of a polyline in kilometers.
///
/// Polylines with fewer than two points have zero length.
#[must_use]
pub fn polyline_length_km(points: &[LatLng]) -> f64 {
    points
        .windows(2)
        .map(|segment| haversine_km(segment[0], segment[1]))
        .sum()
}

/// Maps a coordinate into `geo` space (`x` = longitude, `y` = latitude).
const fn to_coord(point: LatLng) -> Coord<f64> {
    Coord {
        x: point.lng,
        y: point.lat,
    }
}

fn to_rect(bbox: &BoundingBox) -> Rect<f64> {
    Rect::new(
        Coord {
            x: bbox.min_lng,
            y: bbox.min_lat,
        },
        Coord {
            x: bbox.max_lng,
            y: bbox.max_lat,
        },
    )
}

fn from_rect(rect: Rect<f64>) -> BoundingBox {
    BoundingBox {
        min_lat: rect.min().y,
        min_lng: rect.min().x,
        max_lat: rect.max().y,
        max_lng: rect.max().x,
    }
}
