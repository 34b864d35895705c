//! Shared types for event storage and querying.
//!
//! This module contains the identifier, filter, and pagination types that make
//! up the query surface of the event repository. All of them are plain data
//! carriers: the repository in [`crate::query`] interprets them against the
//! database.

mod event_id;
mod filtering;
mod pagination;

pub use event_id::EventId;
pub use filtering::EventFilter;
pub use pagination::{DEFAULT_PAGE_LIMIT, EventPage, FetchOrder, PageCursor, PageRequest};
