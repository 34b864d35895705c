//! Client event model for PostgreSQL database operations.
//!
//! This module provides models for the storefront event log, which records
//! script/app load beacons and cart activity reported by shop frontends.

use diesel::prelude::*;
use ipnet::IpNet;
use jiff_diesel::Timestamp;

use crate::schema::client_events;

/// A client event reported by a storefront.
///
/// Events are immutable once created: this subsystem only ever inserts and
/// reads them. The `id` is assigned by the database in insertion order and
/// doubles as the pagination cursor; `created_at` is stamped server-side at
/// ingestion time.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = client_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientEvent {
    /// Unique event identifier, monotonically increasing with insertion.
    pub id: i64,
    /// Kind of event reported by the frontend (free-form).
    pub event_type: Option<String>,
    /// HTTP method of the request that triggered the event.
    pub method: Option<String>,
    /// Page or endpoint URL the event originated from.
    pub url: Option<String>,
    /// Domain of the storefront that reported the event.
    pub store_domain: Option<String>,
    /// Cart token associated with the event.
    pub cart_token: Option<String>,
    /// Storage key under which the frontend tracked the cart token.
    pub cart_token_key: Option<String>,
    /// Serialized cart line items at the time of the event.
    pub cart_items: Option<String>,
    /// Whether the embed script had loaded when the event fired.
    pub script_loaded: bool,
    /// Whether the product widget had loaded when the event fired.
    pub widget_loaded: bool,
    /// Whether the app bridge had loaded when the event fired.
    pub app_loaded: bool,
    /// Raw request body captured by the frontend.
    pub body: Option<String>,
    /// IP address the event was reported from.
    pub ip_address: Option<IpNet>,
    /// User agent string of the reporting client.
    pub user_agent: Option<String>,
    /// Timestamp when the event was recorded.
    pub created_at: Timestamp,
}

/// Data structure for recording a new client event.
///
/// The identifier and creation timestamp are generated by the database;
/// `ip_address` and `user_agent` are stamped from the incoming request by
/// the ingestion handler, overriding anything client-supplied.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = client_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewClientEvent {
    /// Kind of event reported by the frontend.
    pub event_type: Option<String>,
    /// HTTP method of the request that triggered the event.
    pub method: Option<String>,
    /// Page or endpoint URL the event originated from.
    pub url: Option<String>,
    /// Domain of the storefront that reported the event.
    pub store_domain: Option<String>,
    /// Cart token associated with the event.
    pub cart_token: Option<String>,
    /// Storage key under which the frontend tracked the cart token.
    pub cart_token_key: Option<String>,
    /// Serialized cart line items at the time of the event.
    pub cart_items: Option<String>,
    /// Whether the embed script had loaded when the event fired.
    pub script_loaded: bool,
    /// Whether the product widget had loaded when the event fired.
    pub widget_loaded: bool,
    /// Whether the app bridge had loaded when the event fired.
    pub app_loaded: bool,
    /// Raw request body captured by the frontend.
    pub body: Option<String>,
    /// IP address the event was reported from.
    pub ip_address: Option<IpNet>,
    /// User agent string of the reporting client.
    pub user_agent: Option<String>,
}

impl ClientEvent {
    /// Returns whether this event carries cart activity.
    pub fn is_cart_event(&self) -> bool {
        self.cart_token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Returns whether every frontend component had loaded when the event fired.
    pub fn is_fully_loaded(&self) -> bool {
        self.script_loaded && self.widget_loaded && self.app_loaded
    }

    /// Returns whether the event has user agent information.
    pub fn has_user_agent(&self) -> bool {
        self.user_agent.as_deref().is_some_and(|ua| !ua.is_empty())
    }

    /// Returns the IP address as a formatted string.
    pub fn ip_address_string(&self) -> Option<String> {
        self.ip_address.map(|ip| ip.addr().to_string())
    }
}
