//! Carts Handler Errors

use tracing::error;
use vermeil_app::domain::carts::CartsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::NotFound => ApiError::not_found("cart item not found"),
        CartsServiceError::AlreadyExists => ApiError::conflict("cart item already exists"),
        CartsServiceError::InvalidReference => ApiError::validation("unknown product"),
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            ApiError::validation("invalid cart data")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            ApiError::internal()
        }
    }
}
