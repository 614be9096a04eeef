//! Payment gateway client.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Deserialize;
use uuid::Uuid;

use crate::payments::errors::PaymentGatewayError;

/// Metadata key carrying the order UUID through the provider and back.
pub const METADATA_ORDER_KEY: &str = "order_uuid";

/// Metadata key carrying the purchasing user's UUID.
pub const METADATA_USER_KEY: &str = "user_uuid";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One purchasable line sent to the provider's hosted checkout page.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutLineItem {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Everything the provider needs to host a checkout for one order.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionRequest {
    pub order_uuid: Uuid,
    pub user_uuid: Uuid,
    pub line_items: Vec<CheckoutLineItem>,
}

/// A freshly created provider checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedCheckoutSession {
    pub id: String,
    pub url: String,
}

/// Payment state of a provider checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPaymentStatus {
    Paid,
    Unpaid,
    NoPaymentRequired,
    #[serde(other)]
    Unknown,
}

/// A provider checkout session as returned by a lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub payment_status: SessionPaymentStatus,
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    /// The (order, user) pair this session was created for, when the
    /// provider echoed our metadata back intact.
    #[must_use]
    pub fn order_metadata(&self) -> Option<(Uuid, Uuid)> {
        let order = Uuid::try_parse(self.metadata.get(METADATA_ORDER_KEY)?).ok()?;
        let user = Uuid::try_parse(self.metadata.get(METADATA_USER_KEY)?).ok()?;

        Some((order, user))
    }
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted checkout session for an order.
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CreatedCheckoutSession, PaymentGatewayError>;

    /// Look up an existing checkout session by its provider id.
    async fn fetch_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, PaymentGatewayError>;
}

/// Configuration for connecting to the payment provider.
#[derive(Debug, Clone)]
pub struct HttpPaymentGatewayConfig {
    /// Provider API base, e.g. `"https://api.stripe.com"`.
    pub api_base: String,

    /// Secret API key used as a bearer token.
    pub secret_key: String,

    /// Where the provider sends the customer after paying. The session id
    /// placeholder is appended as a query parameter.
    pub success_url: String,

    /// Where the provider sends the customer after abandoning the checkout.
    pub cancel_url: String,

    /// ISO 4217 currency code for checkout amounts.
    pub currency: String,
}

/// HTTP client for a Stripe-style checkout session API.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    config: HttpPaymentGatewayConfig,
    http: Client,
}

impl HttpPaymentGateway {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: HttpPaymentGatewayConfig) -> Result<Self, PaymentGatewayError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CreatedCheckoutSession, PaymentGatewayError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base);

        let mut form: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            (
                "success_url".to_string(),
                format!(
                    "{}?session_id={{CHECKOUT_SESSION_ID}}",
                    self.config.success_url
                ),
            ),
            ("cancel_url".to_string(), self.config.cancel_url.clone()),
            (
                format!("metadata[{METADATA_ORDER_KEY}]"),
                request.order_uuid.to_string(),
            ),
            (
                format!("metadata[{METADATA_USER_KEY}]"),
                request.user_uuid.to_string(),
            ),
        ];

        for (index, item) in request.line_items.iter().enumerate() {
            form.push((
                format!("line_items[{index}][quantity]"),
                item.quantity.to_string(),
            ));
            form.push((
                format!("line_items[{index}][price_data][currency]"),
                self.config.currency.clone(),
            ));
            form.push((
                format!("line_items[{index}][price_data][unit_amount]"),
                minor_units(item.unit_price)?.to_string(),
            ));
            form.push((
                format!("line_items[{index}][price_data][product_data][name]"),
                item.name.clone(),
            ));
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentGatewayError::UnexpectedResponse(format!(
                "session create failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }

    async fn fetch_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, PaymentGatewayError> {
        let url = format!("{}/v1/checkout/sessions/{session_id}", self.config.api_base);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.secret_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentGatewayError::UnexpectedResponse(format!(
                "session lookup failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

/// Gateway used when no API key is configured. Every call reports the
/// provider as unavailable so the storefront degrades instead of crashing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPaymentGateway;

#[async_trait]
impl PaymentGateway for DisabledPaymentGateway {
    async fn create_checkout_session(
        &self,
        _request: &CheckoutSessionRequest,
    ) -> Result<CreatedCheckoutSession, PaymentGatewayError> {
        Err(PaymentGatewayError::NotConfigured)
    }

    async fn fetch_checkout_session(
        &self,
        _session_id: &str,
    ) -> Result<CheckoutSession, PaymentGatewayError> {
        Err(PaymentGatewayError::NotConfigured)
    }
}

/// Convert a decimal major-unit amount into integer minor units.
fn minor_units(amount: Decimal) -> Result<i64, PaymentGatewayError> {
    let scaled = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(PaymentGatewayError::InvalidAmount)?;

    if scaled.fract() != Decimal::ZERO {
        return Err(PaymentGatewayError::InvalidAmount);
    }

    scaled.to_i64().ok_or(PaymentGatewayError::InvalidAmount)
}
