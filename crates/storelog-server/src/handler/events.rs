//! Client event handlers.
//!
//! This module provides handlers for ingesting storefront events and for
//! the filtered, cursor-paginated event listing.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;
use storelog_postgres::query::ClientEventRepository;
use storelog_postgres::types::EventId;

use crate::extract::{ClientMeta, Json, Path, PgPool, Query};
use crate::handler::request::{EventPathParams, IngestEventRequest, ListEventsQuery};
use crate::handler::response::{ErrorResponse, Event, EventsPage, IngestEventResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for event operations.
const TRACING_TARGET: &str = "storelog_server::handler::events";

/// Records a client event reported by a storefront.
#[tracing::instrument(
    skip_all,
    fields(
        store_domain = request.store_domain.as_deref().unwrap_or_default(),
        event_type = request.event_type.as_deref().unwrap_or_default(),
    )
)]
async fn ingest_event(
    PgPool(mut conn): PgPool,
    client_meta: ClientMeta,
    Json(request): Json<IngestEventRequest>,
) -> Result<(StatusCode, Json<IngestEventResponse>)> {
    tracing::debug!(target: TRACING_TARGET, "Recording client event");

    let event = request.into_model(client_meta.ip_address, client_meta.user_agent);
    let event = conn.record_event(event).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        event_id = event.id,
        "Client event recorded"
    );

    Ok((StatusCode::CREATED, Json(IngestEventResponse::ok())))
}

fn ingest_event_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Record a client event")
        .description(
            "Stores a storefront event. The server stamps the creation time, \
             client IP address, and user agent.",
        )
        .response::<201, Json<IngestEventResponse>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Lists client events matching the filter, one page at a time.
#[tracing::instrument(skip_all)]
async fn list_events(
    PgPool(mut conn): PgPool,
    Query(query): Query<ListEventsQuery>,
) -> Result<(StatusCode, Json<EventsPage>)> {
    tracing::debug!(target: TRACING_TARGET, "Listing client events");

    let filter = query.filter();
    let page = conn.list_events(&filter, query.page_request()).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        event_count = page.len(),
        total = page.total,
        "Client events listed"
    );

    Ok((StatusCode::OK, Json(EventsPage::from_page(page, &query))))
}

fn list_events_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List client events")
        .description(
            "Returns one page of events, newest-first, with forward (`after`) \
             and backward (`before`) continuation cursors. Malformed optional \
             parameters are ignored rather than rejected.",
        )
        .response::<200, Json<EventsPage>>()
}

/// Returns a single event by identifier.
#[tracing::instrument(skip_all, fields(event_id = %path_params.event_id))]
async fn find_event(
    PgPool(mut conn): PgPool,
    Path(path_params): Path<EventPathParams>,
) -> Result<(StatusCode, Json<Event>)> {
    tracing::debug!(target: TRACING_TARGET, "Fetching client event");

    let event_id = path_params.event_id.parse::<EventId>().map_err(|_| {
        ErrorKind::BadRequest
            .with_message("Malformed event identifier")
            .with_resource("event")
            .into_static()
    })?;

    let Some(event) = conn.find_event(event_id).await? else {
        return Err(ErrorKind::NotFound.with_resource("event").into_static());
    };

    Ok((StatusCode::OK, Json(Event::from(event))))
}

fn find_event_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get a client event")
        .description("Returns the full event addressed by its identifier.")
        .response::<200, Json<Event>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns routes for client event ingestion and querying.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/events",
            post_with(ingest_event, ingest_event_docs).get_with(list_events, list_events_docs),
        )
        .api_route("/events/{eventId}", get_with(find_event, find_event_docs))
        .with_path_items(|item| item.tag("Events"))
}
