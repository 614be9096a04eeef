//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;
use vermeil_app::domain::orders::models::OrderUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    state::State,
};

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get one of the user's orders",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order details"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .get_order(user, OrderUuid::from_uuid(uuid.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use vermeil_app::domain::orders::{
        MockOrdersService, OrdersServiceError, models::OrderStatus,
    };

    use crate::test_helpers::{TEST_USER_UUID, authed_service, make_order, state_with_orders};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        authed_service(
            state_with_orders(orders),
            Router::with_path("orders/{uuid}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_own_order_is_returned() -> TestResult {
        let order = make_order(OrderStatus::Paid, Decimal::new(23400, 2));
        let order_uuid = order.uuid.into_uuid();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |user, uuid| *user == TEST_USER_UUID && uuid.into_uuid() == order_uuid)
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::get(format!("http://example.com/orders/{order_uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body = res.take_json::<OrderResponse>().await?;

        assert_eq!(body.uuid, order_uuid);
        assert_eq!(body.total_amount, "234.00");
        assert_eq!(body.shipping_address.city, "Paris");

        Ok(())
    }

    #[tokio::test]
    async fn test_another_users_order_answers_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", Uuid::nil()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_uuid_never_reaches_the_service() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_get_order().never();

        let res = TestClient::get("http://example.com/orders/not-a-uuid")
            .send(&make_service(orders))
            .await;

        // Extraction fails before the handler runs.
        assert_ne!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
