//! Orders Handler Errors

use tracing::error;
use vermeil_app::{domain::orders::OrdersServiceError, payments::PaymentGatewayError};

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::CartEmpty => ApiError::validation("cart is empty"),
        OrdersServiceError::NotFound => ApiError::not_found("order not found"),
        OrdersServiceError::AlreadyExists => ApiError::conflict("order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => ApiError::validation("invalid order data"),
        OrdersServiceError::PaymentIncomplete => ApiError::payment_incomplete(),
        OrdersServiceError::Conflict => ApiError::conflict("payment already processed"),
        OrdersServiceError::CheckoutFailed(PaymentGatewayError::NotConfigured)
        | OrdersServiceError::Gateway(PaymentGatewayError::NotConfigured) => {
            ApiError::payments_not_configured()
        }
        OrdersServiceError::CheckoutFailed(source) => {
            error!("checkout could not be started: {source}");

            ApiError::payment_provider()
        }
        OrdersServiceError::Gateway(source) => {
            error!("payment gateway error: {source}");

            ApiError::payment_provider()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            ApiError::internal()
        }
    }
}
