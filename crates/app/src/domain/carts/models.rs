//! Cart Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::catalog::models::ProductUuid, uuids::TypedUuid};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// Cart line joined with live product data.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_slug: String,
    pub product_image: Option<String>,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Model
#[derive(Debug, Clone)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
}

impl Cart {
    /// Assemble a cart from its lines, totalling as it goes.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let subtotal = items
            .iter()
            .map(|item| item.unit_price * Decimal::from(item.quantity))
            .sum();

        Self { items, subtotal }
    }
}

/// Wishlist Item UUID
pub type WishlistItemUuid = TypedUuid<WishlistItem>;

/// Wishlist entry joined with live product data.
#[derive(Debug, Clone)]
pub struct WishlistItem {
    pub uuid: WishlistItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_slug: String,
    pub product_image: Option<String>,
    pub price: Decimal,
    pub in_stock: bool,
    pub created_at: Timestamp,
}
