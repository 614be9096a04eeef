//! Logging settings.

use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Single-line human-readable output.
    Compact,
    /// One JSON object per line, for log shippers.
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log filter applied when RUST_LOG is not set.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub(crate) log_level: String,

    /// Output format for log lines.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "compact")]
    pub(crate) log_format: LogFormat,
}
