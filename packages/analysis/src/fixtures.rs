//! Fake feature sources and builders shared by the unit tests.

use std::{collections::VecDeque, sync::Mutex};

use tokio::sync::oneshot;
use urban_map_region_models::{BoundingBox, Feature, LatLng, RegionSelection};

use crate::{AnalysisError, FeatureSource};

pub fn feature(tags: &[(&str, &str)]) -> Feature {
    Feature {
        tags: tags
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
        geometry: Vec::new(),
    }
}

pub const fn rect(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> RegionSelection {
    RegionSelection::Rectangle {
        corner1: LatLng::new(lat1, lng1),
        corner2: LatLng::new(lat2, lng2),
    }
}

/// Always returns the same features.
pub struct StaticSource {
    features: Vec<Feature>,
}

impl StaticSource {
    pub const fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }
}

#[async_trait::async_trait]
impl FeatureSource for StaticSource {
    async fn fetch_features(&self, _bbox: &BoundingBox) -> Result<Vec<Feature>, AnalysisError> {
        Ok(self.features.clone())
    }
}

/// Always fails, like an unreachable endpoint.
pub struct FailingSource;

#[async_trait::async_trait]
impl FeatureSource for FailingSource {
    async fn fetch_features(&self, _bbox: &BoundingBox) -> Result<Vec<Feature>, AnalysisError> {
        Err(AnalysisError::Unavailable {
            message: "connection refused".to_string(),
        })
    }
}

/// Never answers.
pub struct PendingSource;

#[async_trait::async_trait]
impl FeatureSource for PendingSource {
    async fn fetch_features(&self, _bbox: &BoundingBox) -> Result<Vec<Feature>, AnalysisError> {
        std::future::pending().await
    }
}

/// Answers each request with whatever the test later sends on the
/// matching channel, in request order.
pub struct GatedSource {
    gates: Mutex<VecDeque<oneshot::Receiver<Vec<Feature>>>>,
}

impl GatedSource {
    pub fn new(gates: Vec<oneshot::Receiver<Vec<Feature>>>) -> Self {
        Self {
            gates: Mutex::new(gates.into()),
        }
    }
}

#[async_trait::async_trait]
impl FeatureSource for GatedSource {
    async fn fetch_features(&self, _bbox: &BoundingBox) -> Result<Vec<Feature>, AnalysisError> {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .pop_front()
            .expect("more requests than gates");
        gate.await.map_err(|e| AnalysisError::Unavailable {
            message: e.to_string(),
        })
    }
}
