//! Order API models.
//!
//! The shipping address payload doubles as request and response shape, so
//! an address read back from an order can be resubmitted unchanged.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vermeil_app::domain::orders::{
    data::CheckoutCreated,
    models::{Order, OrderItem, ShippingAddress},
};

/// Shipping Address Payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingAddressPayload {
    pub full_name: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<ShippingAddress> for ShippingAddressPayload {
    fn from(address: ShippingAddress) -> Self {
        Self {
            full_name: address.full_name,
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            postal_code: address.postal_code,
            country: address.country,
            phone: address.phone,
        }
    }
}

impl From<ShippingAddressPayload> for ShippingAddress {
    fn from(payload: ShippingAddressPayload) -> Self {
        Self {
            full_name: payload.full_name,
            line1: payload.line1,
            line2: payload.line2,
            city: payload.city,
            postal_code: payload.postal_code,
            country: payload.country,
            phone: payload.phone,
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_slug: String,
    pub quantity: u32,
    pub price_at_purchase: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            product_slug: item.product_slug,
            quantity: item.quantity,
            price_at_purchase: item.price_at_purchase.to_string(),
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub status: String,
    pub total_amount: String,
    pub shipping_address: ShippingAddressPayload,
    pub payment_reference: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            status: order.status.as_str().to_string(),
            total_amount: order.total_amount.to_string(),
            shipping_address: order.shipping_address.into(),
            payment_reference: order.payment_reference,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Checkout Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutCreatedResponse {
    pub order_uuid: Uuid,
    /// Payment provider page the client must redirect the customer to.
    pub redirect_url: String,
}

impl From<CheckoutCreated> for CheckoutCreatedResponse {
    fn from(created: CheckoutCreated) -> Self {
        Self {
            order_uuid: created.order_uuid.into_uuid(),
            redirect_url: created.redirect_url,
        }
    }
}
