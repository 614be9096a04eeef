//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_api_error, handlers::session_cookie, models::SessionResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Sign in",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.login", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    // Empty credentials never reach the password check.
    if request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::invalid_credentials());
    }

    let session = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(into_api_error)?;

    let response = SessionResponse::from(&session);

    res.add_cookie(session_cookie(session));

    Ok(Json(response))
}
