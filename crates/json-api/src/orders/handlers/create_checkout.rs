//! Create Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use vermeil_app::domain::orders::models::ShippingAddress;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{
        errors::into_api_error,
        models::{CheckoutCreatedResponse, ShippingAddressPayload},
    },
    state::State,
    validation,
};

/// Create Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCheckoutRequest {
    pub shipping_address: ShippingAddressPayload,
}

/// Create Checkout Handler
#[endpoint(
    tags("checkout"),
    summary = "Start checkout for the current cart",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Checkout session opened"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or invalid address"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment provider failure"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Payments not configured"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "orders.create_checkout", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateCheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutCreatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let address = ShippingAddress::from(json.into_inner().shipping_address);

    validation::shipping_address(&address).map_err(ApiError::validation)?;

    let created = state
        .app
        .orders
        .create_checkout(user, address)
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    info!(order_uuid = %created.order_uuid, "opened checkout session");

    Ok(Json(created.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;
    use vermeil_app::{
        domain::orders::{
            MockOrdersService, OrdersServiceError, data::CheckoutCreated, models::OrderUuid,
        },
        payments::PaymentGatewayError,
    };

    use crate::test_helpers::{ErrorBody, TEST_USER_UUID, authed_service, state_with_orders};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        authed_service(
            state_with_orders(orders),
            Router::with_path("checkout").post(handler),
        )
    }

    fn address_json() -> serde_json::Value {
        json!({
            "shipping_address": {
                "full_name": "Vera Lumen",
                "line1": "12 Quai des Orfèvres",
                "city": "Paris",
                "postal_code": "75001",
                "country": "FR",
            },
        })
    }

    #[tokio::test]
    async fn test_checkout_answers_with_the_redirect_url() -> TestResult {
        let order_uuid = Uuid::new_v4();

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_checkout()
            .once()
            .withf(|user, address| {
                *user == TEST_USER_UUID
                    && address.full_name == "Vera Lumen"
                    && address.country == "FR"
            })
            .return_once(move |_, _| {
                Ok(CheckoutCreated {
                    order_uuid: OrderUuid::from_uuid(order_uuid),
                    redirect_url: "https://pay.example.com/c/cs_123".to_string(),
                })
            });

        let mut res = TestClient::post("http://example.com/checkout")
            .json(&address_json())
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body = res.take_json::<CheckoutCreatedResponse>().await?;

        assert_eq!(body.order_uuid, order_uuid);
        assert_eq!(body.redirect_url, "https://pay.example.com/c/cs_123");

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_country_code_answers_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_create_checkout().never();

        let mut res = TestClient::post("http://example.com/checkout")
            .json(&json!({
                "shipping_address": {
                    "full_name": "Vera Lumen",
                    "line1": "12 Quai des Orfèvres",
                    "city": "Paris",
                    "postal_code": "75001",
                    "country": "France",
                },
            }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body = res.take_json::<ErrorBody>().await?;

        assert_eq!(body.code, "VALIDATION");

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_answers_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_checkout()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::CartEmpty));

        let mut res = TestClient::post("http://example.com/checkout")
            .json(&address_json())
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body = res.take_json::<ErrorBody>().await?;

        assert_eq!(body.message, "cart is empty");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_provider_credentials_answer_503() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_create_checkout().once().return_once(|_, _| {
            Err(OrdersServiceError::CheckoutFailed(
                PaymentGatewayError::NotConfigured,
            ))
        });

        let mut res = TestClient::post("http://example.com/checkout")
            .json(&address_json())
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        let body = res.take_json::<ErrorBody>().await?;

        assert_eq!(body.code, "PAYMENTS_NOT_CONFIGURED");

        Ok(())
    }

    #[tokio::test]
    async fn test_provider_failure_answers_502() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_create_checkout().once().return_once(|_, _| {
            Err(OrdersServiceError::CheckoutFailed(
                PaymentGatewayError::UnexpectedResponse("boom".to_string()),
            ))
        });

        let res = TestClient::post("http://example.com/checkout")
            .json(&address_json())
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
