//! Shared fixtures and service builders for handler tests.
//!
//! Every handler test runs against mocked domain services behind a real
//! salvo [`Service`], so routing, extraction and middleware behave exactly
//! as in production. Mocks built here reject every call by default; tests
//! opt in to the calls they expect.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use serde::Deserialize;
use uuid::Uuid;
use vermeil_app::{
    auth::{IssuedSession, MockAuthService, User, UserUuid},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{Cart, CartItem, CartItemUuid, WishlistItem, WishlistItemUuid},
        },
        catalog::{
            MockCatalogService,
            models::{Category, CategoryUuid, Product, ProductUuid},
        },
        orders::{
            MockOrdersService,
            models::{Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid, ShippingAddress},
        },
    },
};

use crate::{
    cache::ResponseCache,
    config::{cache::CacheConfig, limits::LimitsConfig},
    extensions::*,
    ratelimit::RateLimiters,
    state::State,
};

/// The user every authenticated test request runs as.
pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// Deserialized error envelope, as clients see it.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) code: String,
    pub(crate) message: String,
    pub(crate) timestamp: String,
    #[serde(default)]
    pub(crate) redirect_to: Option<String>,
    #[serde(default)]
    pub(crate) retry_after_seconds: Option<u64>,
}

/// Stand-in for the session middleware: marks the request as belonging to
/// [`TEST_USER_UUID`] without a cookie round-trip.
#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);

    ctrl.call_next(req, depot, res).await;
}

/// Limits high enough that tests never trip them by accident.
pub(crate) fn test_limits() -> LimitsConfig {
    LimitsConfig {
        api_max: 10_000,
        api_window_seconds: 60,
        login_max: 10_000,
        login_window_seconds: 60,
        cart_max: 10_000,
        cart_window_seconds: 60,
        checkout_max: 10_000,
        checkout_window_seconds: 60,
        search_max: 10_000,
        search_window_seconds: 60,
    }
}

pub(crate) fn test_cache() -> CacheConfig {
    CacheConfig {
        default_ttl_seconds: 300,
        categories_ttl_seconds: 3600,
    }
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut mock = MockCatalogService::new();

    mock.expect_list_categories().never();
    mock.expect_get_category_by_slug().never();
    mock.expect_list_products().never();
    mock.expect_get_product_by_slug().never();
    mock.expect_create_category().never();
    mock.expect_create_product().never();

    mock
}

fn strict_carts_mock() -> MockCartsService {
    let mut mock = MockCartsService::new();

    mock.expect_get_cart().never();
    mock.expect_add_to_cart().never();
    mock.expect_update_cart_item().never();
    mock.expect_remove_from_cart().never();
    mock.expect_clear_cart().never();
    mock.expect_get_wishlist().never();
    mock.expect_add_to_wishlist().never();
    mock.expect_remove_from_wishlist().never();

    mock
}

fn strict_orders_mock() -> MockOrdersService {
    let mut mock = MockOrdersService::new();

    mock.expect_create_checkout().never();
    mock.expect_confirm_checkout().never();
    mock.expect_reconcile_payment().never();
    mock.expect_list_orders().never();
    mock.expect_get_order().never();
    mock.expect_cancel_abandoned().never();

    mock
}

fn strict_auth_mock() -> MockAuthService {
    let mut mock = MockAuthService::new();

    mock.expect_register().never();
    mock.expect_login().never();
    mock.expect_authenticate_session().never();
    mock.expect_logout().never();
    mock.expect_get_user().never();
    mock.expect_sweep_expired_sessions().never();

    mock
}

pub(crate) fn make_state(
    catalog: MockCatalogService,
    carts: MockCartsService,
    orders: MockOrdersService,
    auth: MockAuthService,
    webhook_secret: Option<String>,
) -> Arc<State> {
    let app = AppContext {
        catalog: Arc::new(catalog),
        carts: Arc::new(carts),
        orders: Arc::new(orders),
        auth: Arc::new(auth),
    };

    State::build(
        app,
        ResponseCache::new(&test_cache()),
        RateLimiters::new(&test_limits()),
        webhook_secret,
    )
}

pub(crate) fn state_with_catalog(catalog: MockCatalogService) -> Arc<State> {
    make_state(
        catalog,
        strict_carts_mock(),
        strict_orders_mock(),
        strict_auth_mock(),
        None,
    )
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    make_state(
        strict_catalog_mock(),
        carts,
        strict_orders_mock(),
        strict_auth_mock(),
        None,
    )
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    make_state(
        strict_catalog_mock(),
        strict_carts_mock(),
        orders,
        strict_auth_mock(),
        None,
    )
}

pub(crate) fn state_with_orders_and_secret(orders: MockOrdersService, secret: &str) -> Arc<State> {
    make_state(
        strict_catalog_mock(),
        strict_carts_mock(),
        orders,
        strict_auth_mock(),
        Some(secret.to_string()),
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(
        strict_catalog_mock(),
        strict_carts_mock(),
        strict_orders_mock(),
        auth,
        None,
    )
}

/// All services strict, custom rate limits. For limiter middleware tests.
pub(crate) fn state_with_limits(limits: LimitsConfig) -> Arc<State> {
    let app = AppContext {
        catalog: Arc::new(strict_catalog_mock()),
        carts: Arc::new(strict_carts_mock()),
        orders: Arc::new(strict_orders_mock()),
        auth: Arc::new(strict_auth_mock()),
    };

    State::build(
        app,
        ResponseCache::new(&test_cache()),
        RateLimiters::new(&limits),
        None,
    )
}

pub(crate) fn strict_state() -> Arc<State> {
    make_state(
        strict_catalog_mock(),
        strict_carts_mock(),
        strict_orders_mock(),
        strict_auth_mock(),
        None,
    )
}

/// Service with state injected but no authenticated user.
pub(crate) fn anon_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

/// Service whose requests all arrive as [`TEST_USER_UUID`].
pub(crate) fn authed_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn make_user() -> User {
    User {
        uuid: TEST_USER_UUID,
        email: "vera@example.com".to_string(),
        name: "Vera".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_session(token: &str) -> IssuedSession {
    IssuedSession {
        token: token.to_string(),
        expires_at: Timestamp::now() + SignedDuration::from_hours(12),
    }
}

pub(crate) fn make_category(slug: &str) -> Category {
    Category {
        uuid: CategoryUuid::new(),
        slug: slug.to_string(),
        name: slug.to_string(),
        description: "A test category".to_string(),
        image_url: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(slug: &str, price: Decimal) -> Product {
    Product {
        uuid: ProductUuid::new(),
        slug: slug.to_string(),
        name: slug.to_string(),
        description: "A test product".to_string(),
        price,
        compare_at_price: None,
        category_uuid: None,
        images: vec!["https://cdn.example.com/p.jpg".to_string()],
        material: "18k gold vermeil".to_string(),
        gemstone: None,
        weight_grams: None,
        dimensions: None,
        in_stock: true,
        stock_quantity: 5,
        is_featured: false,
        is_new_arrival: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(product: &Product, quantity: u32) -> CartItem {
    CartItem {
        uuid: CartItemUuid::new(),
        product_uuid: product.uuid,
        product_name: product.name.clone(),
        product_slug: product.slug.clone(),
        product_image: product.images.first().cloned(),
        unit_price: product.price,
        quantity,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(items: Vec<CartItem>) -> Cart {
    Cart::from_items(items)
}

pub(crate) fn make_wishlist_item(product: &Product) -> WishlistItem {
    WishlistItem {
        uuid: WishlistItemUuid::new(),
        product_uuid: product.uuid,
        product_name: product.name.clone(),
        product_slug: product.slug.clone(),
        product_image: product.images.first().cloned(),
        price: product.price,
        in_stock: product.in_stock,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_shipping_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Vera Lumen".to_string(),
        line1: "12 Quai des Orfèvres".to_string(),
        line2: None,
        city: "Paris".to_string(),
        postal_code: "75001".to_string(),
        country: "FR".to_string(),
        phone: None,
    }
}

pub(crate) fn make_order(status: OrderStatus, total: Decimal) -> Order {
    let product_uuid = ProductUuid::new();

    Order {
        uuid: OrderUuid::new(),
        user_uuid: TEST_USER_UUID,
        status,
        total_amount: total,
        shipping_address: make_shipping_address(),
        payment_reference: None,
        items: vec![OrderItem {
            uuid: OrderItemUuid::new(),
            product_uuid,
            product_name: "Tidal Band".to_string(),
            product_slug: "tidal-band".to_string(),
            quantity: 1,
            price_at_purchase: total,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
