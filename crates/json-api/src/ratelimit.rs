//! Per-IP fixed-window rate limiting.
//!
//! Counters live in process memory, keyed by client IP. Each named limiter
//! owns an independent (max, window) pair, so checkout can run far stricter
//! than catalog reads. Windows are per-process; a horizontally scaled
//! deployment would move the counters into a shared store.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex, PoisonError};

use jiff::{SignedDuration, Timestamp};
use rustc_hash::FxHashMap;
use salvo::prelude::*;
use tracing::warn;

use crate::{config::limits::LimitsConfig, errors::ApiError, state::State};

/// Outcome of counting one request against a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Allowed,
    /// Over the window's maximum. Retry once the window rolls over.
    Limited { retry_after_seconds: u64 },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Timestamp,
    count: u32,
}

/// A fixed-window request counter.
#[derive(Debug)]
pub(crate) struct FixedWindowLimiter {
    name: &'static str,
    max: u32,
    window: SignedDuration,
    windows: Mutex<FxHashMap<IpAddr, Window>>,
}

impl FixedWindowLimiter {
    pub(crate) fn new(name: &'static str, max: u32, window_seconds: u32) -> Self {
        Self {
            name,
            max,
            window: SignedDuration::from_secs(i64::from(window_seconds)),
            windows: Mutex::new(FxHashMap::default()),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// Count a request from `ip` at `now`.
    pub(crate) fn hit(&self, ip: IpAddr, now: Timestamp) -> Decision {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let window = windows.entry(ip).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(window.started_at) >= self.window {
            window.started_at = now;
            window.count = 0;
        }

        window.count = window.count.saturating_add(1);

        if window.count <= self.max {
            return Decision::Allowed;
        }

        let remaining = self.window - now.duration_since(window.started_at);
        let mut seconds = remaining.as_secs();

        if remaining.subsec_nanos() > 0 {
            seconds += 1;
        }

        Decision::Limited {
            retry_after_seconds: u64::try_from(seconds.max(1)).unwrap_or(1),
        }
    }
}

/// The limiters the router wires in front of route groups.
#[derive(Debug)]
pub(crate) struct RateLimiters {
    pub(crate) api: FixedWindowLimiter,
    pub(crate) login: FixedWindowLimiter,
    pub(crate) cart: FixedWindowLimiter,
    pub(crate) checkout: FixedWindowLimiter,
    pub(crate) search: FixedWindowLimiter,
}

impl RateLimiters {
    pub(crate) fn new(config: &LimitsConfig) -> Self {
        Self {
            api: FixedWindowLimiter::new("api", config.api_max, config.api_window_seconds),
            login: FixedWindowLimiter::new("login", config.login_max, config.login_window_seconds),
            cart: FixedWindowLimiter::new("cart", config.cart_max, config.cart_window_seconds),
            checkout: FixedWindowLimiter::new(
                "checkout",
                config.checkout_max,
                config.checkout_window_seconds,
            ),
            search: FixedWindowLimiter::new(
                "search",
                config.search_max,
                config.search_window_seconds,
            ),
        }
    }
}

#[salvo::handler]
pub(crate) async fn api(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    enforce(|limiters| &limiters.api, req, depot, res, ctrl).await;
}

#[salvo::handler]
pub(crate) async fn login(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    enforce(|limiters| &limiters.login, req, depot, res, ctrl).await;
}

#[salvo::handler]
pub(crate) async fn cart(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    enforce(|limiters| &limiters.cart, req, depot, res, ctrl).await;
}

#[salvo::handler]
pub(crate) async fn checkout(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    enforce(|limiters| &limiters.checkout, req, depot, res, ctrl).await;
}

#[salvo::handler]
pub(crate) async fn search(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    enforce(|limiters| &limiters.search, req, depot, res, ctrl).await;
}

async fn enforce(
    pick: fn(&RateLimiters) -> &FixedWindowLimiter,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let ip = client_ip(req);

    let outcome = match depot.obtain::<Arc<State>>() {
        Ok(state) => {
            let limiter = pick(&state.limiters);

            (limiter.name(), limiter.hit(ip, Timestamp::now()))
        }
        Err(_missing) => {
            res.render(ApiError::internal());
            ctrl.skip_rest();
            return;
        }
    };

    match outcome {
        (_, Decision::Allowed) => {
            ctrl.call_next(req, depot, res).await;
        }
        (name, Decision::Limited { retry_after_seconds }) => {
            warn!(limiter = name, client = %ip, "rate limit exceeded");

            res.render(ApiError::rate_limited(retry_after_seconds));
            ctrl.skip_rest();
        }
    }
}

/// The peer address, reduced to an IP. Unix sockets and test transports have
/// no peer IP; they share one identity.
fn client_ip(req: &Request) -> IpAddr {
    let addr = req.remote_addr();

    if let Some(v4) = addr.as_ipv4() {
        IpAddr::V4(*v4.ip())
    } else if let Some(v6) = addr.as_ipv6() {
        IpAddr::V6(*v6.ip())
    } else {
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    }
}
