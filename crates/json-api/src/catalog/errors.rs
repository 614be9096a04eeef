//! Catalog error mapping.

use tracing::error;
use vermeil_app::domain::catalog::CatalogServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CatalogServiceError) -> ApiError {
    match error {
        CatalogServiceError::NotFound => ApiError::not_found("catalog entry not found"),
        CatalogServiceError::AlreadyExists => ApiError::conflict("catalog entry already exists"),
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => ApiError::validation("invalid catalog data"),
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            ApiError::internal()
        }
    }
}
