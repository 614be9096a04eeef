//! Shared application state.

use std::sync::Arc;

use vermeil_app::context::AppContext;

use crate::{cache::ResponseCache, ratelimit::RateLimiters};

/// State injected into every request's depot.
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) cache: ResponseCache,
    pub(crate) limiters: RateLimiters,
    /// Shared secret for webhook signature checks. `None` rejects all
    /// deliveries.
    pub(crate) webhook_secret: Option<String>,
}

impl State {
    pub(crate) fn build(
        app: AppContext,
        cache: ResponseCache,
        limiters: RateLimiters,
        webhook_secret: Option<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            app,
            cache,
            limiters,
            webhook_secret,
        })
    }
}
