//! External service configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use storelog_postgres::{PgClient, PgConfig, PgResult, run_pending_migrations};

/// Tracing target for service configuration.
const TRACING_TARGET: &str = "storelog_server::service::config";

/// Configuration for the external services this server depends on.
///
/// The database is the only collaborator: events are persisted to and read
/// from PostgreSQL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// PostgreSQL connection and pool configuration.
    #[cfg_attr(feature = "config", clap(flatten))]
    pub postgres: PgConfig,
}

impl ServiceConfig {
    /// Creates a configuration around the given database settings.
    pub fn new(postgres: PgConfig) -> Self {
        Self { postgres }
    }

    /// Connects to PostgreSQL, verifies connectivity, and applies pending
    /// migrations.
    pub async fn connect_postgres(&self) -> PgResult<PgClient> {
        let client = PgClient::new_with_test(self.postgres.clone()).await?;

        let applied = run_pending_migrations(&client).await?;
        if !applied.is_empty() {
            tracing::info!(
                target: TRACING_TARGET,
                migrations = applied.len(),
                "applied pending database migrations"
            );
        }

        Ok(client)
    }
}
