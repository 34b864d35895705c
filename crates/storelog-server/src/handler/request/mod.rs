//! Request types consumed by the handlers.

mod events;
mod paths;

pub use events::{IngestEventRequest, ListEventsQuery};
pub use paths::EventPathParams;
