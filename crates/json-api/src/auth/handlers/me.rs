//! Current Account Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{errors::into_api_error, models::UserResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Current Account Handler
#[endpoint(
    tags("auth"),
    summary = "Current account",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Account data"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let user = state.app.auth.get_user(user).await.map_err(into_api_error)?;

    Ok(Json(user.into()))
}
