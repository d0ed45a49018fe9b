//! HTTP client for the Overpass interpreter endpoint.
//!
//! Sends exactly one request per call. Retrying is left to the caller;
//! region analysis treats any failure as "no data" rather than retrying.

use std::time::Duration;

use urban_map_region_models::{BoundingBox, Feature};

use crate::{OverpassError, parse_http_response, query::build_query, service::OverpassService};

/// Overpass client bound to a single endpoint.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    service: OverpassService,
}

impl OverpassClient {
    /// Creates a client for `service` with its timeout applied to every
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the underlying HTTP client cannot
    /// be built (e.g. TLS backend initialization failure).
    pub fn new(service: OverpassService) -> Result<Self, OverpassError> {
        let client = reqwest::Client::builder()
            .user_agent(service.user_agent.clone())
            .timeout(Duration::from_secs(service.timeout_secs))
            .build()?;
        Ok(Self { client, service })
    }

    /// Creates a client for the embedded endpoint, honoring `OVERPASS_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError`] if the service config is invalid or the
    /// HTTP client cannot be built.
    pub fn from_env() -> Result<Self, OverpassError> {
        Self::new(OverpassService::from_env()?)
    }

    /// Returns the endpoint configuration.
    #[must_use]
    pub const fn service(&self) -> &OverpassService {
        &self.service
    }

    /// Builds the POST request for `bbox` without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the endpoint URL is invalid.
    pub fn build_request(&self, bbox: &BoundingBox) -> Result<reqwest::Request, OverpassError> {
        let query = build_query(bbox, self.service.timeout_secs);
        Ok(self
            .client
            .post(&self.service.base_url)
            .body(query)
            .build()?)
    }

    /// Queries all amenity, road, and transit features inside `bbox`.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError`] if the request fails, the server answers
    /// with a non-success status, or the body is not valid Overpass JSON.
    pub async fn query_features(&self, bbox: &BoundingBox) -> Result<Vec<Feature>, OverpassError> {
        let request = self.build_request(bbox)?;
        log::debug!(
            "Querying {} for bbox {}",
            self.service.name,
            bbox.to_query_string()
        );

        let resp = self.client.execute(request).await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let features = parse_http_response(status, &body)?;
        log::debug!("Overpass returned {} elements", features.len());
        Ok(features)
    }
}
