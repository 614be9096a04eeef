//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vermeil_app::domain::carts::models::CartItemUuid;

use crate::{
    carts::{errors::into_api_error, models::CartResponse},
    errors::ApiError,
    extensions::*,
    state::State,
    validation,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateItemRequest {
    pub quantity: u32,
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Set a cart line's quantity",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "carts.update_item", skip(json, depot), err)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    validation::quantity(request.quantity).map_err(ApiError::validation)?;

    let cart = state
        .app
        .carts
        .update_cart_item(
            user,
            CartItemUuid::from_uuid(uuid.into_inner()),
            request.quantity,
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(cart.into()))
}
