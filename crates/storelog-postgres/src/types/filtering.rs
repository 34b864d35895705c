//! Filtering options for client event queries.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Filter options for client events.
///
/// A filter is a conjunction of optional predicates; each dimension is
/// applied only when set. The filter never carries a cursor bound: cursor
/// predicates belong to [`PageRequest`] so that the total count of a page
/// stays stable while paging (see [`list_events`]).
///
/// [`PageRequest`]: crate::types::PageRequest
/// [`list_events`]: crate::query::ClientEventRepository::list_events
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EventFilter {
    /// Match events from this storefront domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    store_domain: Option<String>,
    /// Match events carrying this cart token.
    #[serde(skip_serializing_if = "Option::is_none")]
    cart_token: Option<String>,
    /// Inclusive lower bound on the event creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    created_from: Option<Timestamp>,
    /// Exclusive upper bound on the event creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    created_before: Option<Timestamp>,
}

impl EventFilter {
    /// Creates a new empty filter.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by storefront domain (exact match). Empty values are ignored.
    pub fn with_store_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        if !domain.is_empty() {
            self.store_domain = Some(domain);
        }
        self
    }

    /// Filters by cart token (exact match). Empty values are ignored.
    pub fn with_cart_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !token.is_empty() {
            self.cart_token = Some(token);
        }
        self
    }

    /// Filters by a calendar date range in `YYYY-MM-DD` form.
    ///
    /// `from` bounds the creation time at midnight UTC of the named day
    /// (inclusive); `to` includes the entire named day, i.e. the internal
    /// bound is midnight UTC of the following day, exclusive. Unparseable
    /// dates are silently ignored and that bound is left open.
    pub fn with_date_range(mut self, from: Option<&str>, to: Option<&str>) -> Self {
        self.created_from = from.and_then(parse_date).and_then(day_start);
        self.created_before = to
            .and_then(parse_date)
            .and_then(|date| date.tomorrow().ok())
            .and_then(day_start);
        self
    }

    /// Returns the storefront domain predicate, if set.
    #[inline]
    pub fn store_domain(&self) -> Option<&str> {
        self.store_domain.as_deref()
    }

    /// Returns the cart token predicate, if set.
    #[inline]
    pub fn cart_token(&self) -> Option<&str> {
        self.cart_token.as_deref()
    }

    /// Returns the inclusive lower creation-time bound, if set.
    #[inline]
    pub fn created_from(&self) -> Option<Timestamp> {
        self.created_from
    }

    /// Returns the exclusive upper creation-time bound, if set.
    #[inline]
    pub fn created_before(&self) -> Option<Timestamp> {
        self.created_before
    }

    /// Returns whether any predicate is active.
    pub fn is_empty(&self) -> bool {
        self.store_domain.is_none()
            && self.cart_token.is_none()
            && self.created_from.is_none()
            && self.created_before.is_none()
    }
}

/// Parses a `YYYY-MM-DD` calendar date, ignoring malformed input.
fn parse_date(raw: &str) -> Option<Date> {
    raw.trim().parse().ok()
}

/// Returns the UTC timestamp at midnight of the given day.
fn day_start(date: Date) -> Option<Timestamp> {
    date.to_zoned(TimeZone::UTC).ok().map(|zoned| zoned.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        let filter = EventFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.store_domain(), None);
        assert_eq!(filter.cart_token(), None);
    }

    #[test]
    fn empty_strings_are_ignored() {
        let filter = EventFilter::new().with_store_domain("").with_cart_token("");
        assert!(filter.is_empty());
    }

    #[test]
    fn equality_dimensions() {
        let filter = EventFilter::new()
            .with_store_domain("shop-a.example.com")
            .with_cart_token("tok_123");

        assert_eq!(filter.store_domain(), Some("shop-a.example.com"));
        assert_eq!(filter.cart_token(), Some("tok_123"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn to_date_includes_the_entire_day() {
        let filter = EventFilter::new().with_date_range(None, Some("2024-03-10"));

        let bound = filter.created_before().expect("upper bound should be set");
        let last_second: Timestamp = "2024-03-10T23:59:59Z".parse().unwrap();
        let next_midnight: Timestamp = "2024-03-11T00:00:00Z".parse().unwrap();

        assert!(last_second < bound);
        assert!(next_midnight >= bound);
    }

    #[test]
    fn from_date_is_inclusive_at_midnight() {
        let filter = EventFilter::new().with_date_range(Some("2024-03-10"), None);

        let bound = filter.created_from().expect("lower bound should be set");
        let midnight: Timestamp = "2024-03-10T00:00:00Z".parse().unwrap();
        assert_eq!(bound, midnight);
    }

    #[test]
    fn malformed_dates_are_dropped() {
        let filter = EventFilter::new().with_date_range(Some("not-a-date"), Some("2024-13-40"));
        assert_eq!(filter.created_from(), None);
        assert_eq!(filter.created_before(), None);
        assert!(filter.is_empty());
    }
}
