//! List Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use vermeil_app::domain::catalog::data::ProductFilter;

use crate::{
    catalog::{
        errors::into_api_error,
        handlers::{parse_bool, parse_price, parse_sort, parse_u32},
        models::ProductResponse,
    },
    errors::ApiError,
    extensions::*,
    state::State,
    validation,
};

/// List Products Handler
#[endpoint(
    tags("catalog"),
    summary = "List products",
    responses(
        (status_code = StatusCode::OK, description = "Product list"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filters"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[expect(clippy::too_many_arguments, reason = "one parameter per query filter")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    min_price: QueryParam<String, false>,
    max_price: QueryParam<String, false>,
    material: QueryParam<String, false>,
    in_stock: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    limit: QueryParam<String, false>,
    offset: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let min_price = parse_price("min_price", min_price.into_inner())?;
    let max_price = parse_price("max_price", max_price.into_inner())?;

    validation::price_range(min_price, max_price).map_err(ApiError::validation)?;

    let sort = parse_sort(sort.into_inner())?;
    let page = validation::pagination(
        parse_u32("limit", limit.into_inner())?,
        parse_u32("offset", offset.into_inner())?,
    )
    .map_err(ApiError::validation)?;

    let filter = ProductFilter {
        category_slug: category.into_inner(),
        min_price,
        max_price,
        material: material.into_inner(),
        in_stock: parse_bool("in_stock", in_stock.into_inner())?,
        ..ProductFilter::default()
    };

    let products = state
        .app
        .catalog
        .list_products(filter, sort, page)
        .await
        .map_err(into_api_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
