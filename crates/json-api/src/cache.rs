//! In-process response cache for catalog reads.
//!
//! Successful anonymous GET responses are kept as rendered JSON keyed by
//! path plus canonicalized query string. Requests carrying a session cookie
//! bypass the cache entirely, so personalized responses are never stored or
//! served to the wrong visitor. Entries expire by TTL; mutations purge
//! derived read paths through a hand-maintained denylist.

use std::sync::{Arc, Mutex, PoisonError};

use jiff::{SignedDuration, Timestamp};
use rustc_hash::FxHashMap;
use salvo::http::{Method, ResBody};
use salvo::prelude::*;

use crate::{auth::middleware::SESSION_COOKIE, config::cache::CacheConfig, state::State};

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    expires_at: Timestamp,
}

#[derive(Debug)]
pub(crate) struct ResponseCache {
    default_ttl: SignedDuration,
    categories_ttl: SignedDuration,
    entries: Mutex<FxHashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub(crate) fn new(config: &CacheConfig) -> Self {
        Self {
            default_ttl: SignedDuration::from_secs(i64::from(config.default_ttl_seconds)),
            categories_ttl: SignedDuration::from_secs(i64::from(config.categories_ttl_seconds)),
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    pub(crate) fn get(&self, key: &str, now: Timestamp) -> Option<String> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.body.clone()),
            Some(_expired) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub(crate) fn insert(&self, key: String, body: String, now: Timestamp) {
        let expires_at = now + self.ttl_for(&key);

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        entries.insert(key, CacheEntry { body, expires_at });
    }

    /// Drop every entry whose key starts with one of `prefixes`.
    pub(crate) fn invalidate_prefixes(&self, prefixes: &[&str]) {
        if prefixes.is_empty() {
            return;
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        entries.retain(|key, _entry| !prefixes.iter().any(|prefix| key.starts_with(prefix)));
    }

    /// Drop expired entries, returning how many were removed.
    pub(crate) fn purge_expired(&self, now: Timestamp) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let before = entries.len();

        entries.retain(|_key, entry| entry.expires_at > now);

        before - entries.len()
    }

    fn ttl_for(&self, key: &str) -> SignedDuration {
        if key.starts_with("/categories") {
            self.categories_ttl
        } else {
            self.default_ttl
        }
    }
}

/// Cache key for a request: path plus query pairs in sorted order, so
/// `?b=2&a=1` and `?a=1&b=2` share an entry.
pub(crate) fn cache_key(path: &str, query: Option<&str>) -> String {
    match query {
        None | Some("") => path.to_string(),
        Some(query) => {
            let mut pairs: Vec<&str> = query.split('&').collect();

            pairs.sort_unstable();

            format!("{path}?{}", pairs.join("&"))
        }
    }
}

/// Read paths whose cached responses a mutation under `path` must drop.
/// A denylist, not a dependency graph: new derived views get added by hand.
pub(crate) fn invalidation_targets(path: &str) -> &'static [&'static str] {
    if path.starts_with("/products") || path.starts_with("/categories") {
        &["/products", "/categories"]
    } else {
        &[]
    }
}

/// Middleware serving anonymous GETs from the cache and capturing fresh
/// responses on the way out.
#[salvo::handler]
pub(crate) async fn serve(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if *req.method() != Method::GET || req.cookie(SESSION_COOKIE).is_some() {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_missing) => {
            ctrl.call_next(req, depot, res).await;
            return;
        }
    };

    let key = cache_key(req.uri().path(), req.uri().query());

    if let Some(body) = state.cache.get(&key, Timestamp::now()) {
        res.status_code(StatusCode::OK);
        res.render(Text::Json(body));
        ctrl.skip_rest();
        return;
    }

    ctrl.call_next(req, depot, res).await;

    // Status is still unset at this point for handlers that answered a
    // plain 200.
    let success = match res.status_code {
        None => true,
        Some(code) => code == StatusCode::OK,
    };

    if !success || !is_json(res) {
        return;
    }

    let body = res.take_body();

    if let ResBody::Once(bytes) = &body {
        if let Ok(text) = std::str::from_utf8(bytes) {
            state.cache.insert(key, text.to_string(), Timestamp::now());
        }
    }

    _ = res.replace_body(body);
}

/// Middleware purging derived read entries after successful mutations.
#[salvo::handler]
pub(crate) async fn invalidate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let mutating = matches!(
        *req.method(),
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    );
    let path = req.uri().path().to_string();

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_missing) => {
            ctrl.call_next(req, depot, res).await;
            return;
        }
    };

    ctrl.call_next(req, depot, res).await;

    let success = match res.status_code {
        None => true,
        Some(code) => code.is_success(),
    };

    if mutating && success {
        state.cache.invalidate_prefixes(invalidation_targets(&path));
    }
}

fn is_json(res: &Response) -> bool {
    res.headers()
        .get(salvo::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}
