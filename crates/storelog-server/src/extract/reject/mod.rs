//! Request extractors with improved rejection handling.
//!
//! Drop-in replacements for the standard Axum extractors that convert
//! rejections into the server's [`Error`] type with useful context.
//!
//! [`Error`]: crate::handler::Error

mod json;
mod path;
mod query;

pub use self::json::Json;
pub use self::path::Path;
pub use self::query::Query;
