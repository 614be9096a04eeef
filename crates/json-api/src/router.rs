//! App Router

use salvo::Router;

use crate::{auth, cache, carts, catalog, orders, ratelimit, webhooks, wishlist};

pub(crate) fn app_router() -> Router {
    // Public catalog reads sit behind the response cache.
    let catalog = Router::new()
        .hoop(cache::serve)
        .push(Router::with_path("categories").get(catalog::handlers::categories::handler))
        .push(
            Router::with_path("products")
                .get(catalog::handlers::index::handler)
                .push(Router::with_path("featured").get(catalog::handlers::featured::handler))
                .push(
                    Router::with_path("new-arrivals").get(catalog::handlers::new_arrivals::handler),
                )
                .push(
                    Router::with_path("search")
                        .hoop(ratelimit::search)
                        .get(catalog::handlers::search::handler),
                )
                // Static segments above must come before the slug catch-all.
                .push(Router::with_path("{slug}").get(catalog::handlers::get::handler)),
        );

    // Logout stays outside the session middleware: clearing an absent
    // session is a successful no-op.
    let accounts = Router::new()
        .push(Router::with_path("auth/register").post(auth::handlers::register::handler))
        .push(
            Router::with_path("auth/login")
                .hoop(ratelimit::login)
                .post(auth::handlers::login::handler),
        )
        .push(Router::with_path("auth/logout").post(auth::handlers::logout::handler))
        .push(
            Router::with_path("auth/me")
                .hoop(auth::middleware::handler)
                .get(auth::handlers::me::handler),
        );

    let protected = Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::handlers::get::handler)
                .delete(carts::handlers::clear::handler)
                .push(
                    Router::with_path("items")
                        .hoop(ratelimit::cart)
                        .post(carts::handlers::add_item::handler)
                        .push(
                            Router::with_path("{uuid}")
                                .put(carts::handlers::update_item::handler)
                                .delete(carts::handlers::remove_item::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("wishlist")
                .get(wishlist::handlers::get::handler)
                .push(
                    Router::with_path("items")
                        .post(wishlist::handlers::add::handler)
                        .push(
                            Router::with_path("{product_uuid}")
                                .delete(wishlist::handlers::remove::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("checkout")
                .push(
                    Router::new()
                        .hoop(ratelimit::checkout)
                        .post(orders::handlers::create_checkout::handler),
                )
                .push(Router::with_path("confirm").get(orders::handlers::confirm::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::handlers::index::handler)
                .push(Router::with_path("{uuid}").get(orders::handlers::get::handler)),
        );

    // Webhook deliveries authenticate by signature, not session.
    Router::new()
        .hoop(cache::invalidate)
        .push(catalog)
        .push(accounts)
        .push(protected)
        .push(Router::with_path("webhooks/payments").post(webhooks::handler))
}
