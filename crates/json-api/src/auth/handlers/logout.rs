//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{errors::into_api_error, handlers::removal_cookie, middleware::SESSION_COOKIE},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Logout Handler
#[endpoint(
    tags("auth"),
    summary = "Sign out",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Signed out"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.logout", skip_all, err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let token = cookie.value().to_string();

        state.app.auth.logout(&token).await.map_err(into_api_error)?;
    }

    res.add_cookie(removal_cookie());

    Ok(StatusCode::NO_CONTENT)
}
