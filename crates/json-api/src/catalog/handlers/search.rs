//! Search Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use vermeil_app::domain::catalog::data::{ProductFilter, ProductSort};

use crate::{
    catalog::{errors::into_api_error, handlers::parse_u32, models::ProductResponse},
    errors::ApiError,
    extensions::*,
    state::State,
    validation,
};

/// Search Products Handler
#[endpoint(
    tags("catalog"),
    summary = "Search products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid query"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    limit: QueryParam<String, false>,
    offset: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(query) = q.into_inner() else {
        return Err(ApiError::validation("q is required"));
    };

    validation::search_query(&query).map_err(ApiError::validation)?;

    let page = validation::pagination(
        parse_u32("limit", limit.into_inner())?,
        parse_u32("offset", offset.into_inner())?,
    )
    .map_err(ApiError::validation)?;

    let filter = ProductFilter {
        search: Some(query.trim().to_string()),
        ..ProductFilter::default()
    };

    let products = state
        .app
        .catalog
        .list_products(filter, ProductSort::default(), page)
        .await
        .map_err(into_api_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use vermeil_app::domain::catalog::MockCatalogService;

    use crate::test_helpers::{ErrorBody, anon_service, make_product, state_with_catalog};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        anon_service(
            state_with_catalog(catalog),
            Router::with_path("products/search").get(handler),
        )
    }

    #[tokio::test]
    async fn test_search_term_reaches_the_filter_trimmed() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .withf(|filter, _sort, _page| filter.search.as_deref() == Some("opal"))
            .return_once(|_, _, _| Ok(vec![make_product("opal-charm", Decimal::new(6400, 2))]));

        let mut res = TestClient::get("http://example.com/products/search?q=%20opal%20")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body = res.take_json::<Vec<ProductResponse>>().await?;

        assert_eq!(body.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_query_answers_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_list_products().never();

        let mut res = TestClient::get("http://example.com/products/search")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body = res.take_json::<ErrorBody>().await?;

        assert_eq!(body.code, "VALIDATION");
        assert_eq!(body.message, "q is required");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_query_answers_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_list_products().never();

        let res = TestClient::get("http://example.com/products/search?q=%20%20")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
