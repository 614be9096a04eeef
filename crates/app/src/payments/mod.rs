//! Payment provider integration.

pub mod errors;
pub mod events;
pub mod gateway;
pub mod signature;

pub use errors::PaymentGatewayError;
pub use events::{PaymentOutcome, WebhookEvent, WebhookEventKind};
pub use gateway::*;
