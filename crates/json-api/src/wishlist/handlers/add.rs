//! Add Wishlist Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use vermeil_app::domain::catalog::models::ProductUuid;

use crate::{carts::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// Add Wishlist Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddWishlistItemRequest {
    pub product_uuid: Uuid,
}

/// Add Wishlist Item Handler
#[endpoint(
    tags("wishlist"),
    summary = "Save a product to the wishlist",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown product"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "wishlist.add", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<AddWishlistItemRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    state
        .app
        .carts
        .add_to_wishlist(user, ProductUuid::from_uuid(request.product_uuid))
        .await
        .map_err(into_api_error)?;

    info!(product_uuid = %request.product_uuid, "saved product to wishlist");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use vermeil_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{ErrorBody, TEST_USER_UUID, authed_service, state_with_carts};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        authed_service(
            state_with_carts(carts),
            Router::with_path("wishlist/items").post(handler),
        )
    }

    #[tokio::test]
    async fn test_saving_a_product_answers_204() -> TestResult {
        let product_uuid = Uuid::new_v4();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_to_wishlist()
            .once()
            .withf(move |user, product| {
                *user == TEST_USER_UUID && product.into_uuid() == product_uuid
            })
            .return_once(|_, _| Ok(()));

        let res = TestClient::post("http://example.com/wishlist/items")
            .json(&json!({ "product_uuid": product_uuid }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_saving_twice_is_idempotent() -> TestResult {
        let mut carts = MockCartsService::new();

        // The service treats a repeat save as a no-op, not an error.
        carts
            .expect_add_to_wishlist()
            .times(2)
            .returning(|_, _| Ok(()));

        let service = make_service(carts);

        for _attempt in 0..2 {
            let res = TestClient::post("http://example.com/wishlist/items")
                .json(&json!({ "product_uuid": Uuid::nil() }))
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_answers_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_to_wishlist()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidReference));

        let mut res = TestClient::post("http://example.com/wishlist/items")
            .json(&json!({ "product_uuid": Uuid::nil() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body = res.take_json::<ErrorBody>().await?;

        assert_eq!(body.message, "unknown product");

        Ok(())
    }
}
