//! Wishlist API models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vermeil_app::domain::carts::models::WishlistItem;

/// Wishlist Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_slug: String,
    pub product_image: Option<String>,
    pub price: String,
    pub in_stock: bool,
    pub created_at: String,
}

impl From<WishlistItem> for WishlistItemResponse {
    fn from(item: WishlistItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            product_slug: item.product_slug,
            product_image: item.product_image,
            price: item.price.to_string(),
            in_stock: item.in_stock,
            created_at: item.created_at.to_string(),
        }
    }
}
