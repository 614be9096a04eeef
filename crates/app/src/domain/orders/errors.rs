//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::payments::PaymentGatewayError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart is empty")]
    CartEmpty,

    #[error("order not found")]
    NotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("payment has not completed")]
    PaymentIncomplete,

    #[error("order is in a conflicting state")]
    Conflict,

    #[error("checkout could not be started")]
    CheckoutFailed(#[source] PaymentGatewayError),

    #[error("payment gateway error")]
    Gateway(#[from] PaymentGatewayError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
