//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    auth::{errors::into_api_error, handlers::session_cookie, models::UserResponse},
    errors::ApiError,
    extensions::*,
    state::State,
    validation,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Register Handler
#[endpoint(
    tags("auth"),
    summary = "Register an account",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created and signed in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Validation failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.register", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    validation::email(&request.email).map_err(ApiError::validation)?;
    validation::password(&request.password).map_err(ApiError::validation)?;
    validation::display_name(&request.name).map_err(ApiError::validation)?;

    let user = state
        .app
        .auth
        .register(&request.email, &request.password, &request.name)
        .await
        .map_err(into_api_error)?;

    // Sign the fresh account in right away.
    let session = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(into_api_error)?;

    res.add_cookie(session_cookie(session));
    res.status_code(StatusCode::CREATED);

    info!(user_uuid = %user.uuid, "registered account");

    Ok(Json(user.into()))
}
