//! Overpass endpoint configuration.
//!
//! The default endpoint is defined in `services/overpass.toml` and embedded
//! at compile time. The `OVERPASS_URL` environment variable overrides the
//! base URL (e.g. to point at a self-hosted instance).

use serde::Deserialize;

use crate::OverpassError;

/// An Overpass endpoint configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassService {
    /// Unique identifier (e.g. `"overpass"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Interpreter URL the query is POSTed to.
    pub base_url: String,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Request timeout in seconds. Also sent as the `[timeout:N]` hint.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    25
}

const SERVICE_TOML: &str = include_str!("../services/overpass.toml");

impl OverpassService {
    /// Parses a service definition from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Config`] if the TOML is malformed.
    pub fn from_toml(toml_str: &str) -> Result<Self, OverpassError> {
        toml::de::from_str(toml_str).map_err(|e| OverpassError::Config {
            message: e.to_string(),
        })
    }

    /// Returns the embedded default service.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Config`] if the embedded TOML is malformed.
    pub fn embedded() -> Result<Self, OverpassError> {
        Self::from_toml(SERVICE_TOML)
    }

    /// Returns the embedded service with `OVERPASS_URL` applied.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Config`] if the embedded TOML is malformed.
    pub fn from_env() -> Result<Self, OverpassError> {
        let mut service = Self::embedded()?;
        if let Ok(url) = std::env::var("OVERPASS_URL") {
            if !url.trim().is_empty() {
                log::info!("Using Overpass endpoint from OVERPASS_URL: {url}");
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
        let service = OverpassService::embedded().unwrap();
        assert_eq!(service.id, "overpass");
        assert!(service.base_url.starts_with("https://"));
        assert!(!service.user_agent.is_empty());
        assert_eq!(service.timeout_secs, 25);
    }

    #[test]
    fn timeout_defaults_when_omitted() {
        let service = OverpassService::from_toml(
            r#"
            id = "local"
            name = "Local Overpass"
            base_url = "http://localhost:12345/api/interpreter"
            user_agent = "test"
            "#,
        )
        .unwrap();
        assert_eq!(service.timeout_secs, 25);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = OverpassService::from_toml("id = ").unwrap_err();
        assert!(matches!(err, OverpassError::Config { .. }));
    }
}
