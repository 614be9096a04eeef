//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use vermeil_app::domain::catalog::models::ProductUuid;

use crate::{
    carts::{errors::into_api_error, models::CartResponse},
    errors::ApiError,
    extensions::*,
    state::State,
    validation,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    pub product_uuid: Uuid,
    pub quantity: u32,
}

/// Add Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Add a product to the cart",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product or quantity"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "carts.add_item", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    validation::quantity(request.quantity).map_err(ApiError::validation)?;

    let cart = state
        .app
        .carts
        .add_to_cart(user, ProductUuid::from_uuid(request.product_uuid), request.quantity)
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    info!(
        product_uuid = %request.product_uuid,
        quantity = request.quantity,
        "added product to cart"
    );

    Ok(Json(cart.into()))
}
