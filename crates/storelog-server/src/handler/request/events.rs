//! Request types for event ingestion and listing.

use ipnet::IpNet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use storelog_postgres::model::NewClientEvent;
use storelog_postgres::types::{EventFilter, PageRequest};

/// Query parameters accepted by the event listing endpoint.
///
/// Every parameter is optional and lenient: values that fail to parse are
/// treated as absent rather than rejected, so a malformed cursor or date
/// degrades to a broader query instead of an error. Parameters are carried
/// as raw strings because typed deserialization would turn a bad value
/// into a 400.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListEventsQuery {
    /// Maximum number of events per page; defaults to 50 when absent or
    /// non-numeric. There is no upper bound: oversized pages are a caller
    /// responsibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    /// Cursor: return events strictly older than this identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Cursor: return events strictly newer than this identifier.
    /// Takes precedence over `after` when both are supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Storefront domain to filter by (exact match).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    /// Cart token to filter by (exact match).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_token: Option<String>,
    /// Inclusive lower bound on the event date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Upper bound on the event date (`YYYY-MM-DD`), inclusive of the
    /// entire named day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl ListEventsQuery {
    /// Builds the non-cursor filter from the query parameters.
    pub fn filter(&self) -> EventFilter {
        let mut filter = EventFilter::new();

        if let Some(store) = self.store.as_deref() {
            filter = filter.with_store_domain(store);
        }

        if let Some(token) = self.cart_token.as_deref() {
            filter = filter.with_cart_token(token);
        }

        filter.with_date_range(self.from.as_deref(), self.to.as_deref())
    }

    /// Builds the page request from the limit and cursor parameters.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(
            self.limit.as_deref(),
            self.after.as_deref(),
            self.before.as_deref(),
        )
    }
}

/// Payload accepted by the event ingestion endpoint.
///
/// Field-mapped into a [`NewClientEvent`]; the server stamps the client IP
/// and user agent from the request itself, overriding anything supplied in
/// the body. The creation timestamp is assigned by the database.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestEventRequest {
    /// Kind of event reported by the frontend.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// HTTP method of the request that triggered the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Page or endpoint URL the event originated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Domain of the storefront that reported the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_domain: Option<String>,
    /// Cart token associated with the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_token: Option<String>,
    /// Storage key under which the frontend tracked the cart token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_token_key: Option<String>,
    /// Serialized cart line items at the time of the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_items: Option<String>,
    /// Whether the embed script had loaded when the event fired.
    #[serde(default)]
    pub script_loaded: bool,
    /// Whether the product widget had loaded when the event fired.
    #[serde(default)]
    pub widget_loaded: bool,
    /// Whether the app bridge had loaded when the event fired.
    #[serde(default)]
    pub app_loaded: bool,
    /// Raw request body captured by the frontend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl IngestEventRequest {
    /// Converts the payload into an insertable event, stamping the
    /// server-observed client address and user agent.
    pub fn into_model(self, ip_address: Option<IpNet>, user_agent: Option<String>) -> NewClientEvent {
        NewClientEvent {
            event_type: self.event_type,
            method: self.method,
            url: self.url,
            store_domain: self.store_domain,
            cart_token: self.cart_token,
            cart_token_key: self.cart_token_key,
            cart_items: self.cart_items,
            script_loaded: self.script_loaded,
            widget_loaded: self.widget_loaded,
            app_loaded: self.app_loaded,
            body: self.body,
            ip_address,
            user_agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use storelog_postgres::types::{DEFAULT_PAGE_LIMIT, EventId, PageCursor};

    use super::*;

    fn query(pairs: &[(&str, &str)]) -> ListEventsQuery {
        let mut query = ListEventsQuery::default();
        for (key, value) in pairs {
            let value = Some((*value).to_owned());
            match *key {
                "limit" => query.limit = value,
                "after" => query.after = value,
                "before" => query.before = value,
                "store" => query.store = value,
                "cart_token" => query.cart_token = value,
                "from" => query.from = value,
                "to" => query.to = value,
                other => panic!("unknown parameter {other}"),
            }
        }
        query
    }

    #[test]
    fn empty_query_is_first_page_default_limit() {
        let query = ListEventsQuery::default();

        let page = query.page_request();
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(page.cursor, None);
        assert!(query.filter().is_empty());
    }

    #[test]
    fn unparseable_after_is_the_same_as_no_after() {
        let bad = query(&[("after", "not-an-id")]);
        let none = ListEventsQuery::default();

        assert_eq!(bad.page_request(), none.page_request());
    }

    #[test]
    fn before_takes_precedence_over_after() {
        let both = query(&[("after", "4"), ("before", "9")]);

        assert_eq!(
            both.page_request().cursor,
            Some(PageCursor::Before(EventId::new(9)))
        );
    }

    #[test]
    fn non_numeric_limit_falls_back_to_default() {
        let bad = query(&[("limit", "plenty")]);
        assert_eq!(bad.page_request().limit, DEFAULT_PAGE_LIMIT);

        let huge = query(&[("limit", "100000")]);
        assert_eq!(huge.page_request().limit, 100000);
    }

    #[test]
    fn filter_dimensions_map_through() {
        let query = query(&[
            ("store", "shop-a.example.com"),
            ("cart_token", "tok_1"),
            ("from", "2024-03-01"),
            ("to", "2024-03-10"),
        ]);

        let filter = query.filter();
        assert_eq!(filter.store_domain(), Some("shop-a.example.com"));
        assert_eq!(filter.cart_token(), Some("tok_1"));
        assert!(filter.created_from().is_some());
        assert!(filter.created_before().is_some());
    }

    #[test]
    fn blank_and_malformed_filters_are_dropped() {
        let query = query(&[("store", ""), ("from", "yesterday")]);
        assert!(query.filter().is_empty());
    }

    #[test]
    fn ingest_request_stamps_server_fields() {
        let request = IngestEventRequest {
            event_type: Some("cart".into()),
            store_domain: Some("shop-a.example.com".into()),
            script_loaded: true,
            ..Default::default()
        };

        let ip: IpNet = "203.0.113.9/32".parse().unwrap();
        let event = request.into_model(Some(ip), Some("Mozilla/5.0".into()));

        assert_eq!(event.event_type.as_deref(), Some("cart"));
        assert_eq!(event.ip_address, Some(ip));
        assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert!(event.script_loaded);
        assert!(!event.app_loaded);
    }

    #[test]
    fn ingest_request_uses_original_wire_names() {
        let raw = r#"{
            "type": "script_load",
            "storeDomain": "shop-a.example.com",
            "scriptLoaded": true,
            "cartToken": "tok_1"
        }"#;

        let request: IngestEventRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.event_type.as_deref(), Some("script_load"));
        assert_eq!(request.store_domain.as_deref(), Some("shop-a.example.com"));
        assert_eq!(request.cart_token.as_deref(), Some("tok_1"));
        assert!(request.script_loaded);
    }
}
