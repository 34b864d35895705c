//! Client event response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use storelog_postgres::model::ClientEvent;
use storelog_postgres::types::EventPage;

use crate::handler::request::ListEventsQuery;

/// Response type for a single client event.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event identifier (opaque, ordered by insertion).
    pub id: String,
    /// Kind of event reported by the frontend.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// HTTP method of the request that triggered the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Page or endpoint URL the event originated from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Domain of the storefront that reported the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_domain: Option<String>,
    /// Cart token associated with the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_token: Option<String>,
    /// Storage key under which the frontend tracked the cart token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_token_key: Option<String>,
    /// Serialized cart line items at the time of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_items: Option<String>,
    /// Whether the embed script had loaded when the event fired.
    pub script_loaded: bool,
    /// Whether the product widget had loaded when the event fired.
    pub widget_loaded: bool,
    /// Whether the app bridge had loaded when the event fired.
    pub app_loaded: bool,
    /// Raw request body captured by the frontend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// IP address the event was reported from.
    #[serde(rename = "ip", skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// User agent string of the reporting client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// When the event was recorded.
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
}

impl From<ClientEvent> for Event {
    fn from(event: ClientEvent) -> Self {
        Self {
            id: event.id.to_string(),
            ip_address: event.ip_address_string(),
            event_type: event.event_type,
            method: event.method,
            url: event.url,
            store_domain: event.store_domain,
            cart_token: event.cart_token,
            cart_token_key: event.cart_token_key,
            cart_items: event.cart_items,
            script_loaded: event.script_loaded,
            widget_loaded: event.widget_loaded,
            app_loaded: event.app_loaded,
            body: event.body,
            user_agent: event.user_agent,
            created_at: event.created_at.into(),
        }
    }
}

/// Response type for the paginated event listing.
///
/// Events are ordered newest-first. `nextID` continues toward older events
/// when passed back as `after`; `prevID` returns toward newer events when
/// passed back as `before`. Both are empty strings when the page is empty.
/// The filter parameters are echoed back as received.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    /// The events in this page, newest-first.
    pub events: Vec<Event>,
    /// Count of events matching the filter, ignoring the cursor.
    pub total: i64,
    /// Identifier of the oldest event in the page.
    #[serde(rename = "nextID")]
    pub next_id: String,
    /// Identifier of the newest event in the page.
    #[serde(rename = "prevID")]
    pub prev_id: String,
    /// Echo of the `store` filter parameter.
    pub store: String,
    /// Echo of the `cart_token` filter parameter.
    pub cart_token: String,
    /// Echo of the `from` filter parameter.
    pub from: String,
    /// Echo of the `to` filter parameter.
    pub to: String,
}

impl EventsPage {
    /// Builds the response from an engine page, echoing the request filters.
    pub fn from_page(page: EventPage<ClientEvent>, query: &ListEventsQuery) -> Self {
        let next_id = page.next_id.map(|id| id.to_string()).unwrap_or_default();
        let prev_id = page.prev_id.map(|id| id.to_string()).unwrap_or_default();

        Self {
            events: page.records.into_iter().map(Event::from).collect(),
            total: page.total,
            next_id,
            prev_id,
            store: query.store.clone().unwrap_or_default(),
            cart_token: query.cart_token.clone().unwrap_or_default(),
            from: query.from.clone().unwrap_or_default(),
            to: query.to.clone().unwrap_or_default(),
        }
    }
}

/// Acknowledgement returned by the ingestion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IngestEventResponse {
    /// Always `"ok"` on success.
    pub status: String,
}

impl IngestEventResponse {
    /// Creates the success acknowledgement.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use storelog_postgres::types::{EventPage, FetchOrder};

    use super::*;

    fn event(id: i64) -> ClientEvent {
        ClientEvent {
            id,
            event_type: Some("script_load".to_owned()),
            method: None,
            url: None,
            store_domain: Some("shop-a.example.com".to_owned()),
            cart_token: None,
            cart_token_key: None,
            cart_items: None,
            script_loaded: true,
            widget_loaded: false,
            app_loaded: false,
            body: None,
            ip_address: None,
            user_agent: None,
            created_at: jiff::Timestamp::UNIX_EPOCH.into(),
        }
    }

    #[test]
    fn page_tokens_serialize_as_strings() {
        let rows = vec![event(5), event(4)];
        let page = EventPage::new(FetchOrder::NewestFirst, rows, 5, |e| e.id.into());

        let response = EventsPage::from_page(page, &ListEventsQuery::default());
        assert_eq!(response.prev_id, "5");
        assert_eq!(response.next_id, "4");
        assert_eq!(response.total, 5);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["nextID"], "4");
        assert_eq!(json["prevID"], "5");
    }

    #[test]
    fn empty_page_has_empty_tokens() {
        let response = EventsPage::from_page(EventPage::empty(), &ListEventsQuery::default());

        assert!(response.events.is_empty());
        assert_eq!(response.total, 0);
        assert_eq!(response.next_id, "");
        assert_eq!(response.prev_id, "");
    }

    #[test]
    fn filters_are_echoed_back() {
        let query = ListEventsQuery {
            store: Some("shop-a.example.com".to_owned()),
            from: Some("2024-03-01".to_owned()),
            ..Default::default()
        };

        let response = EventsPage::from_page(EventPage::empty(), &query);
        assert_eq!(response.store, "shop-a.example.com");
        assert_eq!(response.from, "2024-03-01");
        assert_eq!(response.cart_token, "");
        assert_eq!(response.to, "");
    }

    #[test]
    fn event_wire_format() {
        let response = Event::from(event(7));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], "7");
        assert_eq!(json["type"], "script_load");
        assert_eq!(json["storeDomain"], "shop-a.example.com");
        assert_eq!(json["scriptLoaded"], true);
        assert!(json.get("cartToken").is_none());
        assert!(json.get("timestamp").is_some());
    }
}
