//! HTTP middleware configuration.

use clap::Args;
use serde::{Deserialize, Serialize};
use storelog_server::middleware::{CorsConfig, RecoveryConfig};

/// Grouped configuration for the HTTP middleware layers.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct MiddlewareConfig {
    /// CORS configuration.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Recovery (timeout and panic handling) configuration.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}
