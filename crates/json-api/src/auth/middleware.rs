//! Session middleware.
//!
//! Protected routes hang behind this hoop. It resolves the session cookie to
//! a user and parks the uuid in the depot; anything else answers the 401
//! envelope with the login redirect.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::error;
use vermeil_app::auth::AuthServiceError;

use crate::{errors::ApiError, extensions::*, state::State};

/// Name of the browser session cookie.
pub(crate) const SESSION_COOKIE: &str = "vermeil_session";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = session_token(req) else {
        res.render(ApiError::unauthenticated());
        ctrl.skip_rest();
        return;
    };

    let authenticated = match depot.obtain::<Arc<State>>() {
        Ok(state) => state.app.auth.authenticate_session(&token).await,
        Err(_missing) => {
            res.render(ApiError::internal());
            ctrl.skip_rest();
            return;
        }
    };

    match authenticated {
        Ok(user) => {
            depot.insert_user_uuid(user);
            ctrl.call_next(req, depot, res).await;
        }
        Err(AuthServiceError::NotFound) => {
            res.render(ApiError::unauthenticated());
            ctrl.skip_rest();
        }
        Err(error) => {
            error!("failed to authenticate session: {error}");

            res.render(ApiError::internal());
            ctrl.skip_rest();
        }
    }
}

fn session_token(req: &Request) -> Option<String> {
    let value = req.cookie(SESSION_COOKIE)?.value().trim();

    if value.is_empty() {
        return None;
    }

    Some(value.to_string())
}
