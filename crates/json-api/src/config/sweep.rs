//! Background sweep settings.

use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct SweepConfig {
    /// How often expired sessions are deleted.
    #[arg(long, env = "SESSION_SWEEP_INTERVAL_SECONDS", default_value_t = 3600)]
    pub(crate) session_interval_seconds: u32,

    /// How often abandoned pending orders are cancelled.
    #[arg(long, env = "ABANDONED_SWEEP_INTERVAL_SECONDS", default_value_t = 3600)]
    pub(crate) abandoned_interval_seconds: u32,

    /// Age before a pending order counts as abandoned.
    #[arg(long, env = "ABANDONED_ORDER_HOURS", default_value_t = 24)]
    pub(crate) abandoned_after_hours: u32,

    /// How often expired response cache entries are dropped.
    #[arg(long, env = "CACHE_SWEEP_INTERVAL_SECONDS", default_value_t = 300)]
    pub(crate) cache_interval_seconds: u32,
}
