//! Liveness probe.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// What `/healthcheck` reports. The version lets a deploy script confirm
/// which build is actually serving.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    fn current() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Healthcheck handler
#[endpoint(tags("health"), summary = "Liveness and deployed version")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}
