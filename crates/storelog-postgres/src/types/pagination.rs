//! Cursor-based pagination over the event identifier axis.
//!
//! Pages are addressed by event identifiers rather than offsets: the caller
//! passes the id of a record it has already seen and receives the adjacent
//! page. Because identifiers increase monotonically with insertion, paging
//! cost stays constant regardless of depth and pages never shift while older
//! records are appended-only.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::EventId;

/// Page size applied when the caller does not request one.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// A resolved cursor bound on the identifier axis.
///
/// `After` pages forward through older records (`id < cursor`), `Before`
/// pages backward through newer ones (`id > cursor`). When a request carries
/// both, `Before` wins; an unparseable cursor is treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum PageCursor {
    /// Return records strictly older than this id.
    After(EventId),
    /// Return records strictly newer than this id.
    Before(EventId),
}

impl PageCursor {
    /// Resolves a cursor from the optional `after`/`before` pair.
    pub fn resolve(after: Option<EventId>, before: Option<EventId>) -> Option<Self> {
        match (before, after) {
            (Some(before), _) => Some(Self::Before(before)),
            (None, Some(after)) => Some(Self::After(after)),
            (None, None) => None,
        }
    }

    /// Resolves a cursor from raw, untrusted query parameter values.
    ///
    /// Unparseable values are dropped, not rejected: a bad cursor degrades to
    /// the first page rather than an error.
    pub fn resolve_raw(after: Option<&str>, before: Option<&str>) -> Option<Self> {
        Self::resolve(
            after.and_then(EventId::parse_opt),
            before.and_then(EventId::parse_opt),
        )
    }
}

/// The order rows are fetched from storage, chosen once per request.
///
/// Pages are always returned to the caller newest-first. Backward paging
/// fetches the rows adjacent to the cursor in ascending order and restores
/// the caller-facing order afterwards; [`FetchOrder::normalize`] is that
/// single reversal point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchOrder {
    /// Fetch descending by id; rows are already newest-first.
    #[default]
    NewestFirst,
    /// Fetch ascending by id, then reverse to newest-first.
    OldestFirstThenReverse,
}

impl FetchOrder {
    /// Returns the fetch order implied by the cursor.
    pub fn from_cursor(cursor: Option<PageCursor>) -> Self {
        match cursor {
            Some(PageCursor::Before(_)) => Self::OldestFirstThenReverse,
            Some(PageCursor::After(_)) | None => Self::NewestFirst,
        }
    }

    /// Returns whether rows are fetched in ascending id order.
    #[inline]
    pub fn is_ascending(self) -> bool {
        matches!(self, Self::OldestFirstThenReverse)
    }

    /// Restores the caller-facing newest-first order after a fetch.
    pub fn normalize<T>(self, mut rows: Vec<T>) -> Vec<T> {
        if self.is_ascending() {
            rows.reverse();
        }
        rows
    }
}

/// A bounded page request against the event identifier axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of records to return.
    ///
    /// There is deliberately no upper bound here; capping oversized pages is
    /// a caller responsibility.
    pub limit: i64,
    /// Position to page from, or `None` for the first page.
    pub cursor: Option<PageCursor>,
}

impl PageRequest {
    /// Creates a request for the first page with the given limit.
    pub fn new(limit: i64) -> Self {
        Self {
            limit: limit.max(1),
            cursor: None,
        }
    }

    /// Creates a request continuing from the given cursor.
    pub fn with_cursor(mut self, cursor: PageCursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Creates a request from raw, untrusted query parameter values.
    ///
    /// A missing, non-numeric, or non-positive limit falls back to
    /// [`DEFAULT_PAGE_LIMIT`]; cursor values follow
    /// [`PageCursor::resolve_raw`] leniency.
    pub fn from_raw(limit: Option<&str>, after: Option<&str>, before: Option<&str>) -> Self {
        let limit = limit
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_PAGE_LIMIT);

        Self {
            limit,
            cursor: PageCursor::resolve_raw(after, before),
        }
    }

    /// Returns the fetch order implied by this request's cursor.
    pub fn fetch_order(&self) -> FetchOrder {
        FetchOrder::from_cursor(self.cursor)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}

/// One page of records plus pagination metadata.
///
/// Records are ordered newest-first. `prev_id` and `next_id` are the ids of
/// the first and last record respectively: passing `next_id` back as `after`
/// continues toward older records, passing `prev_id` back as `before`
/// returns toward newer ones.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPage<T> {
    /// The records in this page, newest-first.
    pub records: Vec<T>,
    /// Count of records matching the filter, ignoring the cursor bound.
    ///
    /// Stable across every page of the same filter.
    pub total: i64,
    /// Id of the oldest record in the page (forward continuation cursor).
    pub next_id: Option<EventId>,
    /// Id of the newest record in the page (backward continuation cursor).
    pub prev_id: Option<EventId>,
}

impl<T> EventPage<T> {
    /// Builds a page from rows fetched in the given order.
    ///
    /// Rows are normalized to newest-first before the cursor tokens are
    /// derived, so the tokens are correct for either traversal direction.
    pub fn new<F>(order: FetchOrder, rows: Vec<T>, total: i64, id_of: F) -> Self
    where
        F: Fn(&T) -> EventId,
    {
        let records = order.normalize(rows);
        let prev_id = records.first().map(&id_of);
        let next_id = records.last().map(&id_of);

        Self {
            records,
            total,
            next_id,
            prev_id,
        }
    }

    /// Creates an empty page.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            next_id: None,
            prev_id: None,
        }
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether this page contains no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maps the records to a different type, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> EventPage<U>
    where
        F: FnMut(T) -> U,
    {
        EventPage {
            records: self.records.into_iter().map(f).collect(),
            total: self.total,
            next_id: self.next_id,
            prev_id: self.prev_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pages over an in-memory descending id sequence the way the repository
    /// pages over the table: apply the cursor bound, sort in fetch order,
    /// truncate to the limit, then build the page.
    fn run_page(ids: &[i64], request: PageRequest) -> EventPage<i64> {
        let order = request.fetch_order();
        let mut matching: Vec<i64> = ids
            .iter()
            .copied()
            .filter(|id| match request.cursor {
                Some(PageCursor::After(after)) => *id < after.get(),
                Some(PageCursor::Before(before)) => *id > before.get(),
                None => true,
            })
            .collect();

        if order.is_ascending() {
            matching.sort_unstable();
        } else {
            matching.sort_unstable_by(|a, b| b.cmp(a));
        }
        matching.truncate(request.limit as usize);

        EventPage::new(order, matching, ids.len() as i64, |id| EventId::new(*id))
    }

    #[test]
    fn cursor_resolution_prefers_before() {
        let after = Some(EventId::new(4));
        let before = Some(EventId::new(9));

        assert_eq!(
            PageCursor::resolve(after, before),
            Some(PageCursor::Before(EventId::new(9)))
        );
        assert_eq!(
            PageCursor::resolve(after, None),
            Some(PageCursor::After(EventId::new(4)))
        );
        assert_eq!(PageCursor::resolve(None, None), None);
    }

    #[test]
    fn raw_cursor_leniency() {
        // A bad cursor behaves as if it was never supplied.
        assert_eq!(PageCursor::resolve_raw(Some("not-an-id"), None), None);
        assert_eq!(
            PageCursor::resolve_raw(Some("7"), Some("bogus")),
            Some(PageCursor::After(EventId::new(7)))
        );
        assert_eq!(
            PageCursor::resolve_raw(None, Some("12")),
            Some(PageCursor::Before(EventId::new(12)))
        );
    }

    #[test]
    fn raw_limit_fallbacks() {
        assert_eq!(PageRequest::from_raw(None, None, None).limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(
            PageRequest::from_raw(Some("abc"), None, None).limit,
            DEFAULT_PAGE_LIMIT
        );
        assert_eq!(
            PageRequest::from_raw(Some("-3"), None, None).limit,
            DEFAULT_PAGE_LIMIT
        );
        assert_eq!(
            PageRequest::from_raw(Some("0"), None, None).limit,
            DEFAULT_PAGE_LIMIT
        );
        // Large limits pass through untouched.
        assert_eq!(PageRequest::from_raw(Some("5000"), None, None).limit, 5000);
    }

    #[test]
    fn fetch_order_from_cursor() {
        assert_eq!(FetchOrder::from_cursor(None), FetchOrder::NewestFirst);
        assert_eq!(
            FetchOrder::from_cursor(Some(PageCursor::After(EventId::new(3)))),
            FetchOrder::NewestFirst
        );
        assert_eq!(
            FetchOrder::from_cursor(Some(PageCursor::Before(EventId::new(3)))),
            FetchOrder::OldestFirstThenReverse
        );
    }

    #[test]
    fn normalize_reverses_only_ascending_fetches() {
        let rows = vec![1, 2, 3];
        assert_eq!(FetchOrder::NewestFirst.normalize(rows.clone()), vec![1, 2, 3]);
        assert_eq!(
            FetchOrder::OldestFirstThenReverse.normalize(rows),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn empty_page_has_no_tokens() {
        let page = run_page(&[], PageRequest::new(10));
        assert!(page.is_empty());
        assert_eq!(page.next_id, None);
        assert_eq!(page.prev_id, None);
    }

    #[test]
    fn first_page_tokens() {
        // The worked example: ids [5,4,3,2,1], limit 2.
        let ids = [5, 4, 3, 2, 1];
        let page = run_page(&ids, PageRequest::new(2));

        assert_eq!(page.records, vec![5, 4]);
        assert_eq!(page.prev_id, Some(EventId::new(5)));
        assert_eq!(page.next_id, Some(EventId::new(4)));
    }

    #[test]
    fn forward_paging_visits_every_id_exactly_once() {
        let ids = [9, 8, 7, 6, 5, 4, 3, 2, 1];
        let mut request = PageRequest::new(2);
        let mut seen = Vec::new();

        loop {
            let page = run_page(&ids, request);
            if page.is_empty() {
                break;
            }
            seen.extend(page.records.iter().copied());
            let next = page.next_id.expect("non-empty page has a next token");
            request = PageRequest::new(2).with_cursor(PageCursor::After(next));
        }

        assert_eq!(seen, vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn backward_paging_reproduces_the_previous_page() {
        let ids = [5, 4, 3, 2, 1];

        let first = run_page(&ids, PageRequest::new(2));
        assert_eq!(first.records, vec![5, 4]);

        let second = run_page(
            &ids,
            PageRequest::new(2).with_cursor(PageCursor::After(first.next_id.unwrap())),
        );
        assert_eq!(second.records, vec![3, 2]);
        assert_eq!(second.prev_id, Some(EventId::new(3)));
        assert_eq!(second.next_id, Some(EventId::new(2)));

        // Stepping back from the second page lands on the first page again.
        let back = run_page(
            &ids,
            PageRequest::new(2).with_cursor(PageCursor::Before(second.prev_id.unwrap())),
        );
        assert_eq!(back.records, first.records);
        assert_eq!(back.prev_id, first.prev_id);
        assert_eq!(back.next_id, first.next_id);
    }

    #[test]
    fn backward_paging_from_the_tail_is_newest_first() {
        let ids = [9, 8, 7, 6, 5];

        // Paging backward from id 6 fetches [7, 8, 9] ascending and returns
        // them newest-first.
        let page = run_page(
            &ids,
            PageRequest::new(3).with_cursor(PageCursor::Before(EventId::new(6))),
        );

        assert_eq!(page.records, vec![9, 8, 7]);
        assert_eq!(page.prev_id, Some(EventId::new(9)));
        assert_eq!(page.next_id, Some(EventId::new(7)));
    }

    #[test]
    fn page_map_keeps_metadata() {
        let ids = [3, 2, 1];
        let page = run_page(&ids, PageRequest::new(2)).map(|id| id.to_string());

        assert_eq!(page.records, vec!["3".to_owned(), "2".to_owned()]);
        assert_eq!(page.total, 3);
        assert_eq!(page.prev_id, Some(EventId::new(3)));
        assert_eq!(page.next_id, Some(EventId::new(2)));
    }
}
