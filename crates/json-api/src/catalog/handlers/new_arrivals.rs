//! New Arrivals Handler

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

/// New Arrivals Handler
#[endpoint(
    tags("catalog"),
    summary = "List new arrivals",
    responses(
        (status_code = StatusCode::OK, description = "New arrivals"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid pagination"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<String, false>,
    offset: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = validation::pagination(
        parse_u32("limit", limit.into_inner())?,
        parse_u32("offset", offset.into_inner())?,
    )
    .map_err(ApiError::validation)?;

    let filter = ProductFilter {
        is_new_arrival: Some(true),
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
