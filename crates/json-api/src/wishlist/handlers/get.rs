//! Get Wishlist Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::errors::into_api_error,
    errors::ApiError,
    extensions::*,
    state::State,
    wishlist::models::WishlistItemResponse,
};

/// Get Wishlist Handler
#[endpoint(
    tags("wishlist"),
    summary = "Get the wishlist",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Wishlist items"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<WishlistItemResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let items = state
        .app
        .carts
        .get_wishlist(user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}
