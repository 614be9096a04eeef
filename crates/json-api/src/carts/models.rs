//! Cart API models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vermeil_app::domain::carts::models::{Cart, CartItem};

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_slug: String,
    pub product_image: Option<String>,
    pub unit_price: String,
    pub quantity: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            product_slug: item.product_slug,
            product_image: item.product_image,
            unit_price: item.unit_price.to_string(),
            quantity: item.quantity,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub subtotal: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            items: cart.items.into_iter().map(Into::into).collect(),
            subtotal: cart.subtotal.to_string(),
        }
    }
}
