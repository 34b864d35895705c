//! HTTP request extractors with improved error handling.
//!
//! This module provides custom Axum extractors that enhance the defaults
//! with better error messages, logging, and OpenAPI integration:
//!
//! - [`Json`] - JSON deserialization with detailed error messages
//! - [`Query`] - Query parameter extraction with enhanced error context
//! - [`Path`] - Path parameter extraction with detailed error context
//! - [`PgPool`] - Database connection acquired from the pool
//! - [`AppConnectInfo`] - Client connection information for request stamping

mod connection_info;
mod pg_connection;
mod reject;

pub use crate::extract::connection_info::{AppConnectInfo, ClientMeta};
pub use crate::extract::pg_connection::PgPool;
pub use crate::extract::reject::{Json, Path, Query};
