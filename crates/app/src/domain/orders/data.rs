//! Order Inputs and Results

use crate::domain::orders::models::OrderUuid;

/// Result of starting a checkout: the pending order plus the gateway URL the
/// customer must be redirected to.
#[derive(Debug, Clone)]
pub struct CheckoutCreated {
    pub order_uuid: OrderUuid,
    pub redirect_url: String,
}

/// Outcome of applying a payment notification to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The order transitioned out of pending as a result of this call.
    Applied,
    /// The order had already reached a matching settled state. Safe to
    /// acknowledge without doing anything.
    AlreadySettled,
}
