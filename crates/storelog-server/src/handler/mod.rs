//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod events;
mod monitors;
pub mod request;
pub mod response;

use aide::axum::ApiRouter;

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Returns an [`ApiRouter`] with all routes.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(events::routes())
        .merge(monitors::routes())
}
