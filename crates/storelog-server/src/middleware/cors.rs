//! CORS (Cross-Origin Resource Sharing) middleware configuration.
//!
//! Storefront beacons are sent from arbitrary shop domains, so the default
//! configuration is fully permissive. Deployments that front a fixed set of
//! shops can restrict origins explicitly.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

/// Creates a CORS layer based on the provided configuration.
///
/// With no configured origins every origin is allowed (and credentials are
/// never sent); with an explicit origin list the configured credentials
/// setting applies.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = config.to_header_values();

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .max_age(config.max_age());

    if origins.is_empty() {
        layer
            .allow_origin(Any)
            .allow_headers(Any)
            .allow_credentials(false)
    } else {
        layer
            .allow_origin(origins)
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(config.allow_credentials)
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// List of allowed CORS origins.
    /// If empty, all origins are allowed (storefront beacon mode).
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight requests in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    /// Whether to allow credentials in CORS requests.
    /// Only honored with an explicit origin list.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ALLOW_CREDENTIALS", default_value = "false")
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    /// Returns the CORS max age as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Parses the configured origins into header values, skipping invalid ones.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        self.allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(origin = %origin, error = %err, "Skipping invalid CORS origin");
                    None
                }
            })
            .collect()
    }
}

/// Extension trait for `axum::`[`Router`] to apply the CORS layer.
pub trait RouterCorsExt {
    /// Layers CORS middleware with the provided configuration.
    fn with_cors(self, config: &CorsConfig) -> Self;
}

impl<S> RouterCorsExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_cors(self, config: &CorsConfig) -> Self {
        self.layer(create_cors_layer(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_permissive() {
        let config = CorsConfig::default();
        assert!(config.allowed_origins.is_empty());
        assert!(!config.allow_credentials);
        assert_eq!(config.max_age(), Duration::from_secs(3600));
    }

    #[test]
    fn invalid_origins_are_skipped() {
        let config = CorsConfig {
            allowed_origins: vec![
                "https://shop-a.example.com".to_owned(),
                "not a header value\u{0}".to_owned(),
            ],
            ..CorsConfig::default()
        };

        assert_eq!(config.to_header_values().len(), 1);
    }
}
