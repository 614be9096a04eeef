//! Server configuration.
//!
//! Everything is supplied through CLI flags or environment variables, with a
//! `.env` file read first when one exists. Groups are flattened into one
//! parser so `--help` documents the full surface.

use clap::Parser;

pub(crate) mod cache;
pub(crate) mod db;
pub(crate) mod limits;
pub(crate) mod logging;
pub(crate) mod payments;
pub(crate) mod server;
pub(crate) mod sweep;

#[derive(Debug, Parser)]
#[command(name = "vermeil-json", about = "Vermeil storefront JSON API", long_about = None)]
pub(crate) struct ServerConfig {
    #[command(flatten)]
    pub(crate) server: server::ServerRuntimeConfig,

    #[command(flatten)]
    pub(crate) logging: logging::LoggingConfig,

    #[command(flatten)]
    pub(crate) database: db::DatabaseConfig,

    #[command(flatten)]
    pub(crate) payments: payments::PaymentsConfig,

    #[command(flatten)]
    pub(crate) limits: limits::LimitsConfig,

    #[command(flatten)]
    pub(crate) cache: cache::CacheConfig,

    #[command(flatten)]
    pub(crate) sweep: sweep::SweepConfig,
}

impl ServerConfig {
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// The address the HTTP server binds.
    pub(crate) fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
