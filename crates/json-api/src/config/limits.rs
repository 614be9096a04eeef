//! Rate limit settings.
//!
//! Each limiter is an independent (max, window) pair so payment traffic can
//! run much stricter than catalog reads.

use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct LimitsConfig {
    /// Requests per IP across the whole API per window.
    #[arg(long, env = "API_LIMIT_MAX", default_value_t = 300)]
    pub(crate) api_max: u32,

    #[arg(long, env = "API_LIMIT_WINDOW_SECONDS", default_value_t = 60)]
    pub(crate) api_window_seconds: u32,

    /// Login attempts per IP per window.
    #[arg(long, env = "LOGIN_LIMIT_MAX", default_value_t = 10)]
    pub(crate) login_max: u32,

    #[arg(long, env = "LOGIN_LIMIT_WINDOW_SECONDS", default_value_t = 300)]
    pub(crate) login_window_seconds: u32,

    /// Cart mutations per IP per window.
    #[arg(long, env = "CART_LIMIT_MAX", default_value_t = 60)]
    pub(crate) cart_max: u32,

    #[arg(long, env = "CART_LIMIT_WINDOW_SECONDS", default_value_t = 60)]
    pub(crate) cart_window_seconds: u32,

    /// Checkout attempts per IP per window.
    #[arg(long, env = "CHECKOUT_LIMIT_MAX", default_value_t = 5)]
    pub(crate) checkout_max: u32,

    #[arg(long, env = "CHECKOUT_LIMIT_WINDOW_SECONDS", default_value_t = 300)]
    pub(crate) checkout_window_seconds: u32,

    /// Search requests per IP per window.
    #[arg(long, env = "SEARCH_LIMIT_MAX", default_value_t = 120)]
    pub(crate) search_max: u32,

    #[arg(long, env = "SEARCH_LIMIT_WINDOW_SECONDS", default_value_t = 60)]
    pub(crate) search_window_seconds: u32,
}
