//! Path parameter types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Path parameters for routes addressing a single event.
///
/// The identifier is carried as a raw string: the handler parses it and
/// distinguishes a malformed identifier (400) from a missing record (404).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPathParams {
    /// Identifier of the addressed event.
    pub event_id: String,
}
