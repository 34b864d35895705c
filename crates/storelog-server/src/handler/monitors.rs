//! System health monitoring handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use jiff::Timestamp;
use storelog_postgres::PgClient;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::MonitorStatusResponse;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "storelog_server::handler::monitors";

/// Reports service health based on database pool state.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(pg_client): State<PgClient>,
) -> Result<(StatusCode, Json<MonitorStatusResponse>)> {
    let pool = pg_client.pool_status();
    let is_healthy = !pool.is_under_pressure();

    let response = MonitorStatusResponse {
        is_healthy,
        pool_size: pool.size,
        pool_available: pool.available,
        updated_at: Timestamp::now(),
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        pool_size = pool.size,
        pool_available = pool.available,
        "Health status response prepared"
    );

    Ok((status_code, Json(response)))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get system health status")
        .description("Reports service liveness and database pool utilization.")
        .response::<200, Json<MonitorStatusResponse>>()
        .response::<503, Json<MonitorStatusResponse>>()
}

/// Returns routes for health monitoring.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Monitors"))
}
