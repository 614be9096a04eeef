//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{carts::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Empty the cart",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart emptied"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "carts.clear", skip_all, err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    state
        .app
        .carts
        .clear_cart(user)
        .await
        .map_err(into_api_error)?;

    info!(user_uuid = %user, "cleared cart");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;
    use vermeil_app::domain::carts::MockCartsService;

    use crate::test_helpers::{TEST_USER_UUID, authed_service, state_with_carts};

    use super::*;

    #[tokio::test]
    async fn test_clearing_the_cart_answers_204() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(()));

        let service = authed_service(
            state_with_carts(carts),
            Router::with_path("cart").delete(handler),
        );

        let res = TestClient::delete("http://example.com/cart")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }
}
