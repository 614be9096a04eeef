//! Response cache settings.

use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CacheConfig {
    /// Lifetime of cached catalog responses.
    #[arg(long, env = "CACHE_TTL_SECONDS", default_value_t = 300)]
    pub(crate) default_ttl_seconds: u32,

    /// Lifetime of cached category listings. The category tree changes
    /// rarely, so it holds longer.
    #[arg(long, env = "CACHE_CATEGORIES_TTL_SECONDS", default_value_t = 3600)]
    pub(crate) categories_ttl_seconds: u32,
}
