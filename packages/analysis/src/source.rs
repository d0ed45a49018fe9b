//! Where region features come from.

use urban_map_overpass::OverpassClient;
use urban_map_region_models::{BoundingBox, Feature};

use crate::AnalysisError;

/// A provider of geodata features inside a bounding box.
///
/// Production code uses [`OverpassClient`]; tests substitute fakes to
/// control failures and completion order.
#[async_trait::async_trait]
pub trait FeatureSource: Send + Sync {
    /// Returns every amenity, road, and transit feature inside `bbox`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if the features cannot be retrieved.
    async fn fetch_features(&self, bbox: &BoundingBox) -> Result<Vec<Feature>, AnalysisError>;
}

#[async_trait::async_trait]
impl FeatureSource for OverpassClient {
    async fn fetch_features(&self, bbox: &BoundingBox) -> Result<Vec<Feature>, AnalysisError> {
        Ok(self.query_features(bbox).await?)
    }
}
