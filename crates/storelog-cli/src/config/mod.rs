//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── service: ServiceConfig       # Database connection and pool
//! ├── middleware: MiddlewareConfig # CORS, recovery/timeouts
//! └── server: ServerConfig         # Host, port, shutdown
//! ```
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.

mod middleware;
mod server;

use clap::Parser;
pub use middleware::MiddlewareConfig;
pub use server::ServerConfig;
use storelog_server::service::ServiceConfig;

/// Complete CLI configuration.
///
/// Combines all configuration groups for the storelog server:
/// - [`ServiceConfig`]: External service connections (Postgres)
/// - [`MiddlewareConfig`]: HTTP middleware (CORS, recovery)
/// - [`ServerConfig`]: Network binding and lifecycle
#[derive(Debug, Clone, Parser)]
#[command(name = "storelog")]
#[command(about = "Storefront event log server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// External service configuration (database).
    #[clap(flatten)]
    pub service: ServiceConfig,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_arguments_are_well_formed() {
        Cli::command().debug_assert();
    }
}
