//! Vermeil JSON API Server

use std::{process, sync::Arc, time::Duration};

use jiff::{SignedDuration, Timestamp};
use salvo::{
    affix_state::inject,
    catcher::Catcher,
    oapi::{
        OpenApi,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vermeil_app::context::AppContext;

use crate::{
    auth::middleware::SESSION_COOKIE,
    cache::ResponseCache,
    config::{ServerConfig, logging::LogFormat, sweep::SweepConfig},
    ratelimit::RateLimiters,
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod cache;
mod carts;
mod catalog;
mod config;
mod errors;
mod extensions;
mod healthcheck;
mod orders;
mod ratelimit;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod validation;
mod webhooks;
mod wishlist;

/// Vermeil JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level));

    match config.logging.log_format {
        LogFormat::Compact => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .compact()
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .json()
                .init();
        }
    }

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.payments.gateway_config(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let state = State::build(
        app,
        ResponseCache::new(&config.cache),
        RateLimiters::new(&config.limits),
        config.payments.webhook_secret.clone(),
    );

    spawn_sweepers(Arc::clone(&state), &config.sweep);

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(state))
        .hoop(ratelimit::api)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(router::app_router());

    let doc = OpenApi::new("Vermeil API", "0.1.0")
        .add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    // The catcher turns unmatched routes and other bare failures into the
    // storefront error envelope.
    let service = Service::new(router).catcher(Catcher::default().hoop(errors::catch_unhandled));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(service).await;
}

/// Periodic housekeeping: expired sessions, abandoned pending orders and
/// stale cache entries.
fn spawn_sweepers(state: Arc<State>, config: &SweepConfig) {
    let sessions_every = Duration::from_secs(u64::from(config.session_interval_seconds));
    let orders_every = Duration::from_secs(u64::from(config.abandoned_interval_seconds));
    let cache_every = Duration::from_secs(u64::from(config.cache_interval_seconds));
    let abandoned_after = SignedDuration::from_hours(i64::from(config.abandoned_after_hours));

    let sessions_state = Arc::clone(&state);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sessions_every);

        loop {
            interval.tick().await;

            if let Err(error) = sessions_state.app.auth.sweep_expired_sessions().await {
                error!("session sweep failed: {error}");
            }
        }
    });

    let orders_state = Arc::clone(&state);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(orders_every);

        loop {
            interval.tick().await;

            if let Err(error) = orders_state.app.orders.cancel_abandoned(abandoned_after).await {
                error!("abandoned order sweep failed: {error}");
            }
        }
    });

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cache_every);

        loop {
            interval.tick().await;

            state.cache.purge_expired(Timestamp::now());
        }
    });
}
