//! Auth error mapping.

use tracing::error;
use vermeil_app::auth::AuthServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: AuthServiceError) -> ApiError {
    match error {
        AuthServiceError::InvalidCredentials => ApiError::invalid_credentials(),
        AuthServiceError::AlreadyExists => ApiError::validation("email is already registered"),
        AuthServiceError::NotFound => ApiError::not_found("account not found"),
        AuthServiceError::MissingRequiredData | AuthServiceError::InvalidData => {
            ApiError::validation("invalid account data")
        }
        AuthServiceError::Password(source) => {
            error!("password processing failed: {source}");

            ApiError::internal()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            ApiError::internal()
        }
    }
}
