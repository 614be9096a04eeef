//! Database settings.

use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct DatabaseConfig {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub(crate) database_url: String,
}
