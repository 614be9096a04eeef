//! Remove Wishlist Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;
use vermeil_app::domain::catalog::models::ProductUuid;

use crate::{carts::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// Remove Wishlist Item Handler
#[endpoint(
    tags("wishlist"),
    summary = "Remove a product from the wishlist",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product removed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not on the wishlist"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "wishlist.remove", skip(depot), err)]
pub(crate) async fn handler(
    product_uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    state
        .app
        .carts
        .remove_from_wishlist(user, ProductUuid::from_uuid(product_uuid.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(StatusCode::NO_CONTENT)
}
