//! Nominatim endpoint configuration, embedded from
//! `services/nominatim.toml`. `NOMINATIM_URL` overrides the base URL.

use serde::Deserialize;

use crate::GeocodeError;

/// A Nominatim endpoint configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimService {
    /// Unique identifier (e.g. `"nominatim"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Search endpoint URL.
    pub base_url: String,
    /// `User-Agent` header; Nominatim's usage policy requires one.
    pub user_agent: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of results to request.
    #[serde(default = "default_result_limit")]
    pub result_limit: u32,
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_result_limit() -> u32 {
    5
}

const SERVICE_TOML: &str = include_str!("../services/nominatim.toml");

impl NominatimService {
    /// Returns the embedded service with `NOMINATIM_URL` applied.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Config`] if the embedded TOML is malformed.
    pub fn from_env() -> Result<Self, GeocodeError> {
        let mut service: Self =
            toml::de::from_str(SERVICE_TOML).map_err(|e| GeocodeError::Config {
                message: e.to_string(),
            })?;
        if let Ok(url) = std::env::var("NOMINATIM_URL") {
            if !url.trim().is_empty() {
                service.base_url = url;
            }
        }
        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_service_parses() {
        let service = NominatimService::from_env().unwrap();
        assert_eq!(service.id, "nominatim");
        assert_eq!(service.result_limit, 5);
        assert!(!service.user_agent.is_empty());
    }
}
