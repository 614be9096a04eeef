//! Confirm Checkout Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use tracing::info;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    state::State,
};

/// Confirm Checkout Handler
///
/// Polled by the success page after the provider redirects back. Safe to
/// call repeatedly; settled orders come back unchanged.
#[endpoint(
    tags("checkout"),
    summary = "Confirm a checkout session's payment",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order with settled payment"),
        (status_code = StatusCode::BAD_REQUEST, description = "Payment not completed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown checkout session"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "orders.confirm", skip(session_id, depot), err)]
pub(crate) async fn handler(
    session_id: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let Some(session_id) = session_id.into_inner() else {
        return Err(ApiError::validation("session_id is required"));
    };

    let order = state
        .app
        .orders
        .confirm_checkout(user, &session_id)
        .await
        .map_err(into_api_error)?;

    info!(order_uuid = %order.uuid, status = order.status.as_str(), "confirmed checkout");

    Ok(Json(order.into()))
}
