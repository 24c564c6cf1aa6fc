use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use quizforge_core::config::LayeredConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// HTTP server settings resolved from the layered configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub search_timeout: Duration,
    pub database_url: Option<String>,
}

impl ApiConfig {
    pub fn from_layered(config: &LayeredConfig) -> Self {
        Self {
            bind_address: config.bind_address(),
            cors_origins: config.cors_origins.value.clone(),
            max_upload_bytes: config.max_upload_bytes.value,
            search_timeout: Duration::from_secs(config.search_timeout_secs.value),
            database_url: config.database_url.value.clone(),
        }
    }

    /// Check if PostgreSQL storage is configured
    pub fn uses_postgres(&self) -> bool {
        self.database_url.is_some()
    }

    /// Build the CORS layer for the configured origins
    ///
    /// Credentials are allowed, so a wildcard origin is not usable and is
    /// skipped along with any origin that is not a valid header value.
    pub fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .cors_origins
            .iter()
            .filter_map(|origin| {
                if origin == "*" {
                    tracing::warn!("Ignoring wildcard CORS origin; credentials require explicit origins");
                    return None;
                }
                match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_layered(&LayeredConfig::with_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::config::ConfigSource;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0:5002");
        assert_eq!(config.cors_origins, vec!["http://localhost:3000".to_string()]);
        assert_eq!(config.search_timeout, Duration::from_secs(10));
        assert!(!config.uses_postgres());
    }

    #[test]
    fn test_from_layered_overrides() {
        let mut layered = LayeredConfig::with_defaults();
        layered.port.update(8080, ConfigSource::Environment);
        layered
            .database_url
            .update(Some("postgres://localhost/forum".to_string()), ConfigSource::Environment);
        layered.search_timeout_secs.update(3, ConfigSource::File);

        let config = ApiConfig::from_layered(&layered);
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.search_timeout, Duration::from_secs(3));
        assert!(config.uses_postgres());
    }

    #[test]
    fn test_cors_layer_skips_wildcard() {
        let config = ApiConfig {
            cors_origins: vec!["*".to_string(), "http://localhost:5173".to_string()],
            ..ApiConfig::default()
        };
        // Building the layer must not panic with credentials enabled
        let _layer = config.cors_layer();
    }
}
