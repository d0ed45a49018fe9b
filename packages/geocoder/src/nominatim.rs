//! Nominatim / `OpenStreetMap` free-form search client.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use std::time::Duration;

use crate::{GeoSearchResult, GeocodeError, service::NominatimService};

/// Nominatim search client bound to a single endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    service: NominatimService,
}

impl NominatimClient {
    /// Creates a client for `service`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn new(service: NominatimService) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(service.user_agent.clone())
            .timeout(Duration::from_secs(service.timeout_secs))
            .build()?;
        Ok(Self { client, service })
    }

    /// Creates a client for the embedded endpoint, honoring `NOMINATIM_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the service config is invalid or the HTTP
    /// client cannot be built.
    pub fn from_env() -> Result<Self, GeocodeError> {
        Self::new(NominatimService::from_env()?)
    }

    /// Searches for places matching `query`.
    ///
    /// A blank query returns no results without contacting the server.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the HTTP request or response parsing
    /// fails.
    pub async fn search(&self, query: &str) -> Result<Vec<GeoSearchResult>, GeocodeError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let limit = self.service.result_limit.to_string();
        let resp = self
            .client
            .get(&self.service.base_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("addressdetails", "0"),
            ])
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }
        if !resp.status().is_success() {
            return Err(GeocodeError::Status {
                status: resp.status().as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_response(&body)
    }
}

/// Parses a Nominatim JSON search response.
///
/// Coordinates that cannot be parsed default to `0.0` so a single odd hit
/// does not hide the others.
fn parse_response(body: &serde_json::Value) -> Result<Vec<GeoSearchResult>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    Ok(results
        .iter()
        .map(|item| {
            let coordinate = |key: &str| {
                item[key]
                    .as_str()
                    .and_then(|s| s.parse::<f64>().ok())
                    .unwrap_or_else(|| {
                        log::debug!("Unparsable {key} in Nominatim result, defaulting to 0");
                        0.0
                    })
            };
            GeoSearchResult {
                x: coordinate("lon"),
                y: coordinate("lat"),
                label: item["display_name"].as_str().unwrap_or_default().to_string(),
            }
        })
        .collect())
}
