//! HTTP server settings.

use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ServerRuntimeConfig {
    /// Interface the HTTP server binds.
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub(crate) host: String,

    /// Port the HTTP server listens on.
    #[arg(long, env = "SERVER_PORT", default_value_t = 8720)]
    pub(crate) port: u16,
}
