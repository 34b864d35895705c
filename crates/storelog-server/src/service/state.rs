//! Application state and dependency injection.

use storelog_postgres::{PgClient, PgResult};

use crate::service::ServiceConfig;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    pg_client: PgClient,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to the database and applies pending migrations.
    pub async fn from_config(config: &ServiceConfig) -> PgResult<Self> {
        let service_state = Self {
            pg_client: config.connect_postgres().await?,
        };

        Ok(service_state)
    }

    /// Creates application state around an existing database client.
    pub fn new(pg_client: PgClient) -> Self {
        Self { pg_client }
    }

    /// Returns the database client.
    pub fn pg_client(&self) -> &PgClient {
        &self.pg_client
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(pg_client: PgClient);
