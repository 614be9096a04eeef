//! Payment provider webhook receiver.
//!
//! Deliveries are authenticated by HMAC signature, never by session, so this
//! route lives outside the auth middleware. The provider retries anything
//! that does not get a 2xx; reconciliation is idempotent, so the handler
//! acknowledges everything it can and reserves error statuses for failures
//! a redelivery might actually fix.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use vermeil_app::{
    auth::UserUuid,
    domain::orders::{OrdersServiceError, models::OrderUuid},
    payments::{PaymentOutcome, WebhookEvent, WebhookEventKind, signature},
};

use crate::{errors::ApiError, extensions::*, state::State};

/// Header carrying the provider's `t=...,v1=...` signature.
pub(crate) const SIGNATURE_HEADER: &str = "x-payment-signature";

/// Webhook Acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WebhookAck {
    pub received: bool,
}

impl WebhookAck {
    fn received() -> Json<Self> {
        Json(Self { received: true })
    }
}

/// Payment Webhook Handler
#[endpoint(
    tags("webhooks"),
    summary = "Receive a payment provider event",
    responses(
        (status_code = StatusCode::OK, description = "Event acknowledged"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unverifiable delivery"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Webhooks not configured"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "webhooks.payments", skip_all, err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<WebhookAck>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(secret) = state.webhook_secret.as_deref() else {
        return Err(ApiError::payments_not_configured());
    };

    let Some(header) = req.header::<String>(SIGNATURE_HEADER) else {
        warn!("webhook delivery without a signature header");

        return Err(ApiError::validation("missing signature"));
    };

    let payload = match req.payload().await {
        Ok(payload) => payload,
        Err(error) => {
            warn!("unreadable webhook body: {error}");

            return Err(ApiError::validation("unreadable body"));
        }
    };

    if let Err(error) = signature::verify(
        secret,
        &header,
        payload,
        signature::DEFAULT_TOLERANCE_SECS,
        Timestamp::now(),
    ) {
        warn!("rejected webhook delivery: {error}");

        return Err(ApiError::validation("invalid signature"));
    }

    let event = match WebhookEvent::parse(payload) {
        Ok(event) => event,
        Err(error) => {
            warn!("malformed webhook event: {error}");

            return Err(ApiError::validation("malformed event"));
        }
    };

    let Some(outcome) = event.outcome() else {
        match event.kind() {
            WebhookEventKind::DisputeOpened => {
                warn!(event_id = %event.id, "charge disputed; flagged for manual review");
            }
            _ => info!(event_id = %event.id, event_type = %event.event_type, "ignoring event"),
        }

        return Ok(WebhookAck::received());
    };

    let Some((order, user)) = event.order_metadata() else {
        warn!(event_id = %event.id, "payment event without checkout metadata");

        return Ok(WebhookAck::received());
    };

    // Failed payments keep the order unreferenced so a later attempt can
    // attach its own payment.
    let reference = match outcome {
        PaymentOutcome::Succeeded => Some(event.payment_reference()),
        PaymentOutcome::Failed => None,
    };

    let result = state
        .app
        .orders
        .reconcile_payment(
            OrderUuid::from_uuid(order),
            UserUuid::from_uuid(user),
            outcome,
            reference,
        )
        .await;

    match result {
        Ok(reconciliation) => {
            info!(event_id = %event.id, order_uuid = %order, ?reconciliation, "reconciled payment");

            Ok(WebhookAck::received())
        }
        Err(OrdersServiceError::NotFound) => {
            warn!(event_id = %event.id, order_uuid = %order, "payment event for unknown order");

            Ok(WebhookAck::received())
        }
        Err(OrdersServiceError::Conflict) => {
            warn!(
                event_id = %event.id,
                order_uuid = %order,
                "conflicting payment state; flagged for manual review"
            );

            Ok(WebhookAck::received())
        }
        Err(error) => {
            error!(event_id = %event.id, order_uuid = %order, "reconciliation failed: {error}");

            // A non-2xx asks the provider to redeliver later.
            Err(ApiError::internal())
        }
    }
}
