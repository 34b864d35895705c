//! Health monitor response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response type for the health status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatusResponse {
    /// Whether the service and its database are healthy.
    pub is_healthy: bool,
    /// Current number of connections in the database pool.
    pub pool_size: usize,
    /// Number of idle connections available in the pool.
    pub pool_available: usize,
    /// When this status was produced.
    pub updated_at: Timestamp,
}
