//! Payment provider settings.
//!
//! The storefront runs without a provider configured: checkout answers 503
//! and the webhook rejects deliveries, while the catalog keeps serving.

use clap::Args;
use vermeil_app::payments::HttpPaymentGatewayConfig;

#[derive(Debug, Args)]
pub(crate) struct PaymentsConfig {
    /// Provider API secret key. Unset disables checkout.
    #[arg(long, env = "PAYMENT_SECRET_KEY", hide_env_values = true)]
    pub(crate) secret_key: Option<String>,

    /// Provider API base URL.
    #[arg(long, env = "PAYMENT_API_BASE", default_value = "https://api.stripe.com")]
    pub(crate) api_base: String,

    /// Where the provider sends the customer after a completed payment.
    #[arg(
        long,
        env = "CHECKOUT_SUCCESS_URL",
        default_value = "http://localhost:5173/checkout/success"
    )]
    pub(crate) success_url: String,

    /// Where the provider sends the customer after abandoning checkout.
    #[arg(
        long,
        env = "CHECKOUT_CANCEL_URL",
        default_value = "http://localhost:5173/checkout/cancelled"
    )]
    pub(crate) cancel_url: String,

    /// ISO 4217 currency code for checkout sessions.
    #[arg(long, env = "PAYMENT_CURRENCY", default_value = "usd")]
    pub(crate) currency: String,

    /// Shared secret for webhook signature verification. Unset rejects all
    /// webhook deliveries.
    #[arg(long, env = "PAYMENT_WEBHOOK_SECRET", hide_env_values = true)]
    pub(crate) webhook_secret: Option<String>,
}

impl PaymentsConfig {
    /// Gateway settings, when a secret key is present.
    pub(crate) fn gateway_config(&self) -> Option<HttpPaymentGatewayConfig> {
        let secret_key = self.secret_key.clone()?;

        Some(HttpPaymentGatewayConfig {
            api_base: self.api_base.clone(),
            secret_key,
            success_url: self.success_url.clone(),
            cancel_url: self.cancel_url.clone(),
            currency: self.currency.clone(),
        })
    }
}
