//! Type-safe event identifier.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identifier of a stored client event.
///
/// Backed by the `BIGSERIAL` primary key of `client_events`, so identifiers
/// are totally ordered and monotonically increasing with insertion time.
/// That ordering is the sole pagination axis: a newer event always compares
/// greater than an older one.
///
/// On the wire the identifier is an opaque decimal string; [`Display`] and
/// [`FromStr`] round-trip it losslessly.
///
/// [`Display`]: std::fmt::Display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Creates an identifier from its raw database value.
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw database value.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Parses an identifier from an untrusted string, returning `None` when
    /// the value is not a valid identifier.
    ///
    /// Cursor query parameters use this: an unparseable cursor is treated as
    /// absent rather than rejected.
    pub fn parse_opt(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

impl From<i64> for EventId {
    #[inline]
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<EventId> for i64 {
    #[inline]
    fn from(id: EventId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trip() {
        let id = EventId::new(42);
        let encoded = id.to_string();
        assert_eq!(encoded, "42");
        assert_eq!(encoded.parse::<EventId>().unwrap(), id);
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(EventId::new(2) > EventId::new(1));
        assert!(EventId::new(-1) < EventId::new(0));
    }

    #[test]
    fn parse_opt_lenient() {
        assert_eq!(EventId::parse_opt("17"), Some(EventId::new(17)));
        assert_eq!(EventId::parse_opt(" 17 "), Some(EventId::new(17)));
        assert_eq!(EventId::parse_opt("not-an-id"), None);
        assert_eq!(EventId::parse_opt(""), None);
        assert_eq!(EventId::parse_opt("17.5"), None);
    }
}
