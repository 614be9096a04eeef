//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_api_error, models::CartResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Get Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Get the current cart",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart contents"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(cart.into()))
}
