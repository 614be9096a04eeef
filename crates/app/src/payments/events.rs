//! Webhook event payloads.

use std::collections::HashMap;

use serde::Deserialize;
use uuid::Uuid;

use crate::payments::gateway::{METADATA_ORDER_KEY, METADATA_USER_KEY};

/// Payment outcome a provider event maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Succeeded,
    Failed,
}

/// Provider event kinds the storefront reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookEventKind {
    PaymentSucceeded,
    PaymentFailed,
    /// A customer disputed a charge. Logged for manual review; never mutates
    /// order state automatically.
    DisputeOpened,
    Unrecognized,
}

/// A provider webhook delivery, decoded after signature verification.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    pub object: WebhookObject,
}

/// The provider object an event describes: a payment intent, charge or
/// dispute depending on the event type.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookObject {
    pub id: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl WebhookEvent {
    /// Decode an event from a verified request body.
    ///
    /// # Errors
    ///
    /// Returns an error when the body is not a well-formed event envelope.
    pub fn parse(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    #[must_use]
    pub fn kind(&self) -> WebhookEventKind {
        match self.event_type.as_str() {
            "payment_intent.succeeded" => WebhookEventKind::PaymentSucceeded,
            "payment_intent.payment_failed" => WebhookEventKind::PaymentFailed,
            "charge.dispute.created" => WebhookEventKind::DisputeOpened,
            _ => WebhookEventKind::Unrecognized,
        }
    }

    /// The payment outcome to reconcile, for event kinds that settle orders.
    #[must_use]
    pub fn outcome(&self) -> Option<PaymentOutcome> {
        match self.kind() {
            WebhookEventKind::PaymentSucceeded => Some(PaymentOutcome::Succeeded),
            WebhookEventKind::PaymentFailed => Some(PaymentOutcome::Failed),
            WebhookEventKind::DisputeOpened | WebhookEventKind::Unrecognized => None,
        }
    }

    /// The (order, user) pair the payment belongs to, when the event carries
    /// our checkout metadata.
    #[must_use]
    pub fn order_metadata(&self) -> Option<(Uuid, Uuid)> {
        let metadata = &self.data.object.metadata;

        let order = Uuid::try_parse(metadata.get(METADATA_ORDER_KEY)?).ok()?;
        let user = Uuid::try_parse(metadata.get(METADATA_USER_KEY)?).ok()?;

        Some((order, user))
    }

    /// Provider-side reference to record on the order.
    #[must_use]
    pub fn payment_reference(&self) -> &str {
        &self.data.object.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_json(event_type: &str, order: Uuid, user: Uuid) -> String {
        format!(
            r#"{{
                "id": "evt_1",
                "type": "{event_type}",
                "data": {{
                    "object": {{
                        "id": "pi_123",
                        "metadata": {{
                            "order_uuid": "{order}",
                            "user_uuid": "{user}"
                        }}
                    }}
                }}
            }}"#
        )
    }

    #[test]
    fn succeeded_event_parses_with_metadata() -> Result<(), serde_json::Error> {
        let order = Uuid::now_v7();
        let user = Uuid::now_v7();

        let event = WebhookEvent::parse(
            event_json("payment_intent.succeeded", order, user).as_bytes(),
        )?;

        assert_eq!(event.kind(), WebhookEventKind::PaymentSucceeded);
        assert_eq!(event.outcome(), Some(PaymentOutcome::Succeeded));
        assert_eq!(event.order_metadata(), Some((order, user)));
        assert_eq!(event.payment_reference(), "pi_123");

        Ok(())
    }

    #[test]
    fn failed_event_maps_to_failed_outcome() -> Result<(), serde_json::Error> {
        let event = WebhookEvent::parse(
            event_json("payment_intent.payment_failed", Uuid::now_v7(), Uuid::now_v7())
                .as_bytes(),
        )?;

        assert_eq!(event.outcome(), Some(PaymentOutcome::Failed));

        Ok(())
    }

    #[test]
    fn unrecognized_event_types_have_no_outcome() -> Result<(), serde_json::Error> {
        let event = WebhookEvent::parse(
            event_json("invoice.finalized", Uuid::now_v7(), Uuid::now_v7()).as_bytes(),
        )?;

        assert_eq!(event.kind(), WebhookEventKind::Unrecognized);
        assert_eq!(event.outcome(), None);

        Ok(())
    }

    #[test]
    fn dispute_event_is_recognized_but_settles_nothing() -> Result<(), serde_json::Error> {
        let event = WebhookEvent::parse(
            event_json("charge.dispute.created", Uuid::now_v7(), Uuid::now_v7()).as_bytes(),
        )?;

        assert_eq!(event.kind(), WebhookEventKind::DisputeOpened);
        assert_eq!(event.outcome(), None);

        Ok(())
    }

    #[test]
    fn missing_metadata_yields_no_order() -> Result<(), serde_json::Error> {
        let event = WebhookEvent::parse(
            br#"{"id":"evt_2","type":"payment_intent.succeeded","data":{"object":{"id":"pi_9"}}}"#,
        )?;

        assert_eq!(event.order_metadata(), None);

        Ok(())
    }

    #[test]
    fn malformed_body_fails_to_parse() {
        assert!(WebhookEvent::parse(b"not json").is_err());
        assert!(WebhookEvent::parse(br#"{"id":"evt_3"}"#).is_err());
    }
}
