//! HTTP middleware layers: CORS and error recovery.

mod cors;
mod recovery;

pub use cors::{CorsConfig, RouterCorsExt, create_cors_layer};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
