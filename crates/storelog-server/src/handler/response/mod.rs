//! Response types returned by the handlers.

mod error_response;
mod events;
mod monitor;

pub use error_response::ErrorResponse;
pub use events::{Event, EventsPage, IngestEventResponse};
pub use monitor::MonitorStatusResponse;
