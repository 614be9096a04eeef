//! List Categories Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    catalog::{errors::into_api_error, models::CategoryResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// List Categories Handler
#[endpoint(
    tags("catalog"),
    summary = "List categories",
    responses(
        (status_code = StatusCode::OK, description = "Category list"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .catalog
        .list_categories()
        .await
        .map_err(into_api_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}
