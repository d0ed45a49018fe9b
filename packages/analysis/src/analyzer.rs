//! Region analysis facade.
//!
//! Runs geometry, feature aggregation, scoring, and projection for one
//! selection. The feature request is the only external call; it is
//! attempted once, bounded by a timeout, and any failure degrades the
//! result to zero counts instead of surfacing an error.

use std::{sync::Arc, time::Duration};

use urban_map_geometry::{area_km2, bounding_box_of};
use urban_map_overpass::OverpassClient;
use urban_map_region_models::{
    AmenityCounts, BoundingBox, Feature, RegionAnalysis, RegionSelection, TransportMetrics,
};

use crate::{
    AnalysisError, FeatureSource, amenities::aggregate, population::project, round_to,
    score::score, transport::transport_metrics,
};

/// Default bound on a single feature request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

/// Computes [`RegionAnalysis`] results for region selections.
#[derive(Clone)]
pub struct RegionAnalyzer {
    source: Arc<dyn FeatureSource>,
    timeout: Duration,
}

impl std::fmt::Debug for RegionAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionAnalyzer")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RegionAnalyzer {
    /// Creates an analyzer backed by `source` with [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn new(source: Arc<dyn FeatureSource>) -> Self {
        Self {
            source,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the feature request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates an analyzer backed by the Overpass endpoint from the
    /// environment, using the endpoint's configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Overpass`] if the client cannot be built.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let client = OverpassClient::from_env()?;
        let timeout = Duration::from_secs(client.service().timeout_secs);
        Ok(Self::new(Arc::new(client)).with_timeout(timeout))
    }

    /// Analyzes `selection`.
    ///
    /// Never fails. Only zero-size selections skip the feature request;
    /// failed or timed-out requests yield zero counts, a zero score, and
    /// no population projection, while still reporting the area.
    ///
    /// The reported area is rounded to two decimals and that value feeds
    /// the score, projection, and density. Regions too small to show a
    /// nonzero rounded area use their unrounded area instead.
    pub async fn analyze(&self, selection: &RegionSelection) -> RegionAnalysis {
        let bbox = bounding_box_of(selection);
        let raw_area = area_km2(&bbox);

        if !raw_area.is_finite() || raw_area <= 0.0 {
            log::debug!("Degenerate selection (area {raw_area} km²), skipping feature request");
            return degraded(0.0);
        }

        let area = round_to(raw_area, 2);
        // Below 0.005 km² the displayed area rounds to zero
        let metric_area = if area > 0.0 { area } else { raw_area };

        let features = match self.fetch_features(&bbox).await {
            Ok(features) => features,
            Err(e) => {
                log::warn!(
                    "Feature request failed for bbox {}: {e}",
                    bbox.to_query_string()
                );
                return degraded(area);
            }
        };

        let summary = aggregate(&features);
        log::debug!(
            "Aggregated {} features: {:?}, {:.2} road km, {} transit stops",
            features.len(),
            summary.counts,
            summary.road_km_total,
            summary.transit_stops
        );

        RegionAnalysis {
            area_km2: area,
            amenities: summary.counts,
            infra_score: score(metric_area, &summary.counts),
            population: project(metric_area),
            transport: transport_metrics(
                summary.road_km_total,
                summary.transit_stops,
                metric_area,
            ),
        }
    }

    async fn fetch_features(&self, bbox: &BoundingBox) -> Result<Vec<Feature>, AnalysisError> {
        tokio::time::timeout(self.timeout, self.source.fetch_features(bbox))
            .await
            .map_err(|_| AnalysisError::Timeout {
                millis: self.timeout.as_millis(),
            })?
    }
}

/// A result with the given area and everything else zeroed or absent.
const fn degraded(area_km2: f64) -> RegionAnalysis {
    RegionAnalysis {
        area_km2,
        amenities: AmenityCounts {
            hospitals: 0,
            police: 0,
            fire_stations: 0,
            schools: 0,
            parks: 0,
        },
        infra_score: 0,
        population: None,
        transport: TransportMetrics {
            road_km_total: 0.0,
            road_density_km_per_km2: 0.0,
            transit_stops: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use urban_map_region_models::LatLng;

    use super::*;
    use crate::fixtures::{FailingSource, PendingSource, StaticSource, feature, rect};

    #[tokio::test]
    async fn full_analysis_of_ten_square_km() {
        let mut road = feature(&[("highway", "residential")]);
        road.geometry = vec![LatLng::new(0.0, 0.0), LatLng::new(0.01, 0.0)];
        let features = vec![
            feature(&[("amenity", "hospital")]),
            feature(&[("amenity", "clinic")]),
            feature(&[("amenity", "police")]),
            feature(&[("amenity", "fire_station")]),
            feature(&[("amenity", "school")]),
            feature(&[("amenity", "school")]),
            feature(&[("amenity", "school")]),
            feature(&[("amenity", "school")]),
            feature(&[("amenity", "school")]),
            feature(&[("leisure", "park")]),
            feature(&[("highway", "bus_stop")]),
            feature(&[("railway", "station")]),
            road,
        ];
        let analyzer = RegionAnalyzer::new(Arc::new(StaticSource::new(features)));

        // 0.01° × (10 / 1.11 / 111)° ≈ 10 km²
        let analysis = analyzer
            .analyze(&rect(0.0, 0.0, 0.01, 10.0 / 1.11 / 111.0))
            .await;

        assert!((analysis.area_km2 - 10.0).abs() < f64::EPSILON);
        assert_eq!(analysis.amenities.hospitals, 2);
        assert_eq!(analysis.amenities.schools, 5);
        assert_eq!(analysis.amenities.parks, 1);
        assert_eq!(analysis.infra_score, 100);

        let population = analysis.population.unwrap();
        assert_eq!(population.current, 25_000);
        assert_eq!(population.projected_5_year, 28_285);
        assert_eq!(population.projected_10_year, 32_002);

        assert_eq!(analysis.transport.transit_stops, 2);
        assert!((analysis.transport.road_km_total - 1.1).abs() < 1e-9);
        assert!((analysis.transport.road_density_km_per_km2 - 0.11).abs() < 1e-9);
    }

    #[tokio::test]
    async fn failed_request_degrades_to_zero() {
        let analyzer = RegionAnalyzer::new(Arc::new(FailingSource));
        let analysis = analyzer.analyze(&rect(0.0, 0.0, 0.1, 0.1)).await;

        assert_eq!(analysis.amenities, AmenityCounts::default());
        assert_eq!(analysis.infra_score, 0);
        assert!(analysis.population.is_none());
        assert_eq!(analysis.transport, TransportMetrics::default());
        assert!((analysis.area_km2 - 123.21).abs() < 1e-9);
    }

    #[tokio::test]
    async fn timed_out_request_degrades_to_zero() {
        let analyzer = RegionAnalyzer::new(Arc::new(PendingSource))
            .with_timeout(Duration::from_millis(20));
        let analysis = analyzer.analyze(&rect(0.0, 0.0, 0.1, 0.1)).await;

        assert_eq!(analysis.amenities, AmenityCounts::default());
        assert!(analysis.population.is_none());
    }

    #[tokio::test]
    async fn degenerate_selection_skips_the_request() {
        struct CountingSource(AtomicUsize);

        #[async_trait::async_trait]
        impl FeatureSource for CountingSource {
            async fn fetch_features(
                &self,
                _bbox: &BoundingBox,
            ) -> Result<Vec<Feature>, AnalysisError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(Vec::new())
            }
        }

        let source = Arc::new(CountingSource(AtomicUsize::new(0)));
        let analyzer = RegionAnalyzer::new(source.clone());

        let line = analyzer.analyze(&rect(1.0, 1.0, 1.0, 2.0)).await;
        let point = analyzer
            .analyze(&RegionSelection::Circle {
                center: LatLng::new(1.0, 1.0),
                radius_meters: 0.0,
            })
            .await;

        for analysis in [line, point] {
            assert!(analysis.area_km2.abs() < f64::EPSILON);
            assert_eq!(analysis.infra_score, 0);
            assert!(analysis.population.is_none());
        }
        assert_eq!(source.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn circle_selection_uses_its_bounding_box() {
        let analyzer = RegionAnalyzer::new(Arc::new(StaticSource::new(Vec::new())));
        let analysis = analyzer
            .analyze(&RegionSelection::Circle {
                center: LatLng::new(0.0, 0.0),
                radius_meters: 1113.2,
            })
            .await;

        // 0.02° square: (0.02 * 111)² = 4.9284
        assert!((analysis.area_km2 - 4.93).abs() < 1e-9);
        assert!(analysis.population.is_some());
    }

    #[tokio::test]
    async fn tiny_region_keeps_its_amenities() {
        let features = vec![
            feature(&[("amenity", "hospital")]),
            feature(&[("amenity", "school")]),
            feature(&[("highway", "bus_stop")]),
        ];
        let analyzer = RegionAnalyzer::new(Arc::new(StaticSource::new(features)));

        // About 60 m × 60 m, 0.0036 km²
        let analysis = analyzer
            .analyze(&rect(40.0, -74.0, 40.000_54, -73.999_46))
            .await;

        assert!(analysis.area_km2.abs() < f64::EPSILON);
        assert_eq!(analysis.amenities.hospitals, 1);
        assert_eq!(analysis.amenities.schools, 1);
        assert_eq!(analysis.transport.transit_stops, 1);
        // Hospitals and schools saturate, police and fire are missing
        assert_eq!(analysis.infra_score, 50);
        assert_eq!(analysis.population.unwrap().current, 9);
    }
}
