//! Payment gateway errors.

use thiserror::Error;

/// Errors that can occur when communicating with the payment provider.
#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    /// No provider API key is configured. Checkout is unavailable but the
    /// rest of the storefront keeps working.
    #[error("payment provider is not configured")]
    NotConfigured,

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response or an unexpected body.
    #[error("unexpected response from payment provider: {0}")]
    UnexpectedResponse(String),

    /// An order amount could not be expressed in the provider's minor units.
    #[error("amount cannot be represented in minor units")]
    InvalidAmount,
}
