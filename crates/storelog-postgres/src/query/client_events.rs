//! Client event repository for the storefront event log.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{ClientEvent, NewClientEvent};
use crate::types::{EventFilter, EventId, EventPage, FetchOrder, PageCursor, PageRequest};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Boxed query over `client_events` with a dynamically composed filter.
type BoxedEventsQuery<'a> = schema::client_events::BoxedQuery<'a, diesel::pg::Pg>;

/// Repository for client event database operations.
///
/// Handles event ingestion and the filtered, cursor-paginated read path.
pub trait ClientEventRepository {
    /// Records a new client event, returning it with its assigned identifier.
    fn record_event(
        &mut self,
        event: NewClientEvent,
    ) -> impl Future<Output = PgResult<ClientEvent>> + Send;

    /// Finds a single event by its identifier.
    fn find_event(
        &mut self,
        event_id: EventId,
    ) -> impl Future<Output = PgResult<Option<ClientEvent>>> + Send;

    /// Counts the events matching the filter, ignoring any cursor bound.
    fn count_events(
        &mut self,
        filter: &EventFilter,
    ) -> impl Future<Output = PgResult<i64>> + Send;

    /// Lists one page of events matching the filter.
    ///
    /// Records are returned newest-first together with the continuation
    /// tokens and the cursor-independent total. For a fixed filter and no
    /// concurrent writes, repeatedly passing `next_id` back as the `after`
    /// cursor enumerates every matching event exactly once; passing
    /// `prev_id` back as `before` reproduces the preceding page. Inserts
    /// that land inside an already returned id range are not revisited.
    fn list_events(
        &mut self,
        filter: &EventFilter,
        page: PageRequest,
    ) -> impl Future<Output = PgResult<EventPage<ClientEvent>>> + Send;
}

impl ClientEventRepository for PgConnection {
    async fn record_event(&mut self, event: NewClientEvent) -> PgResult<ClientEvent> {
        use schema::client_events;

        let event = diesel::insert_into(client_events::table)
            .values(&event)
            .returning(ClientEvent::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            event_id = event.id,
            store_domain = event.store_domain.as_deref().unwrap_or_default(),
            "client event recorded"
        );

        Ok(event)
    }

    async fn find_event(&mut self, event_id: EventId) -> PgResult<Option<ClientEvent>> {
        use schema::client_events::dsl::*;

        let event = client_events
            .find(event_id.get())
            .select(ClientEvent::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(event)
    }

    async fn count_events(&mut self, filter: &EventFilter) -> PgResult<i64> {
        let count = filtered(filter)
            .count()
            .get_result::<i64>(self)
            .await
            .map_err(PgError::from)?;

        Ok(count)
    }

    async fn list_events(
        &mut self,
        filter: &EventFilter,
        page: PageRequest,
    ) -> PgResult<EventPage<ClientEvent>> {
        use schema::client_events::dsl::*;

        // The total ignores the cursor bound so it stays stable across
        // every page of the same filter.
        let total = self.count_events(filter).await?;

        let order = page.fetch_order();
        let mut query = filtered(filter)
            .select(ClientEvent::as_select())
            .limit(page.limit);

        query = match page.cursor {
            Some(PageCursor::After(cursor)) => query.filter(id.lt(cursor.get())),
            Some(PageCursor::Before(cursor)) => query.filter(id.gt(cursor.get())),
            None => query,
        };

        query = match order {
            FetchOrder::NewestFirst => query.order(id.desc()),
            FetchOrder::OldestFirstThenReverse => query.order(id.asc()),
        };

        let rows = query.load(self).await.map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            returned = rows.len(),
            total,
            limit = page.limit,
            cursor = ?page.cursor,
            "client events listed"
        );

        Ok(EventPage::new(order, rows, total, |event| {
            EventId::new(event.id)
        }))
    }
}

/// Applies the non-cursor filter dimensions to a boxed query.
///
/// Each predicate is attached only when its dimension is set, so an empty
/// filter degenerates to a full scan of the table.
fn filtered(filter: &EventFilter) -> BoxedEventsQuery<'static> {
    use schema::client_events::dsl::*;

    let mut query = client_events.into_boxed();

    if let Some(domain) = filter.store_domain() {
        query = query.filter(store_domain.eq(domain.to_owned()));
    }

    if let Some(token) = filter.cart_token() {
        query = query.filter(cart_token.eq(token.to_owned()));
    }

    if let Some(from) = filter.created_from() {
        query = query.filter(created_at.ge(jiff_diesel::Timestamp::from(from)));
    }

    if let Some(before) = filter.created_before() {
        query = query.filter(created_at.lt(jiff_diesel::Timestamp::from(before)));
    }

    query
}
