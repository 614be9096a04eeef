//! Storefront error envelope.
//!
//! Every error leaves the API in one shape: a machine-readable `code`, a
//! generic `message`, and a `timestamp`. Internal detail is logged at the
//! point of failure and never serialized into a response.

use jiff::Timestamp;
use salvo::{
    http::header::{HeaderValue, RETRY_AFTER},
    oapi::{Components, EndpointOutRegister, Operation},
    prelude::*,
    writing::Scribe,
};
use serde::Serialize;
use thiserror::Error;

/// Where unauthenticated visitors are sent to establish a session.
const LOGIN_REDIRECT: &str = "/login";

/// An error response in the storefront envelope.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub(crate) struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    redirect_to: Option<&'static str>,
    retry_after_seconds: Option<u64>,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody<'a> {
    code: &'static str,
    message: &'a str,
    timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_to: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after_seconds: Option<u64>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            redirect_to: None,
            retry_after_seconds: None,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION", message)
    }

    /// Missing or rejected session on a protected route. Carries the login
    /// path so the frontend knows where to send the visitor.
    pub(crate) fn unauthenticated() -> Self {
        let mut error = Self::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            "authentication required",
        );

        error.redirect_to = Some(LOGIN_REDIRECT);
        error
    }

    /// Failed login attempt. One message for a wrong password and an unknown
    /// email, so the endpoint cannot be used to enumerate accounts.
    pub(crate) fn invalid_credentials() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            "invalid email or password",
        )
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "CONFLICT", message)
    }

    pub(crate) fn payment_incomplete() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "PAYMENT_INCOMPLETE",
            "payment has not completed",
        )
    }

    pub(crate) fn rate_limited(retry_after_seconds: u64) -> Self {
        let mut error = Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMITED",
            "too many requests",
        );

        error.retry_after_seconds = Some(retry_after_seconds);
        error
    }

    pub(crate) fn payments_not_configured() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "PAYMENTS_NOT_CONFIGURED",
            "payments are not configured",
        )
    }

    pub(crate) fn payment_provider() -> Self {
        Self::new(
            StatusCode::BAD_GATEWAY,
            "PAYMENT_PROVIDER",
            "payment provider error",
        )
    }

    pub(crate) fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal error",
        )
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);

        if let Some(seconds) = self.retry_after_seconds {
            res.headers_mut().insert(RETRY_AFTER, HeaderValue::from(seconds));
        }

        res.render(Json(ApiErrorBody {
            code: self.code,
            message: &self.message,
            timestamp: Timestamp::now(),
            redirect_to: self.redirect_to,
            retry_after_seconds: self.retry_after_seconds,
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(_components: &mut Components, operation: &mut Operation) {
        operation
            .responses
            .insert("4XX", salvo::oapi::Response::new("Request failed"));

        operation
            .responses
            .insert("5XX", salvo::oapi::Response::new("Server error"));
    }
}

/// Catcher hoop that rewrites bare error responses (unmatched routes and
/// other failures that never reached a handler) into the envelope.
#[salvo::handler]
pub(crate) async fn catch_unhandled(
    _req: &mut Request,
    _depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(status) = res.status_code else {
        return;
    };

    let error = match status {
        StatusCode::NOT_FOUND => ApiError::not_found("resource not found"),
        StatusCode::BAD_REQUEST => ApiError::validation("malformed request"),
        status if status.is_server_error() => ApiError::internal(),
        _ => return,
    };

    res.render(error);
    ctrl.skip_rest();
}

#[cfg(test)]
mod tests {
    use salvo::catcher::Catcher;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::ErrorBody;

    use super::*;

    #[salvo::handler]
    async fn failing() -> Result<Json<&'static str>, ApiError> {
        Err(ApiError::rate_limited(17))
    }

    #[salvo::handler]
    async fn rejecting() -> Result<Json<&'static str>, ApiError> {
        Err(ApiError::unauthenticated())
    }

    #[tokio::test]
    async fn test_envelope_carries_code_message_and_timestamp() -> TestResult {
        let service = Service::new(Router::with_path("fail").get(failing));

        let mut res = TestClient::get("http://example.com/fail")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::TOO_MANY_REQUESTS));

        let retry_after = res
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);

        assert_eq!(retry_after.as_deref(), Some("17"));

        let body = res.take_json::<ErrorBody>().await?;

        assert_eq!(body.code, "RATE_LIMITED");
        assert_eq!(body.message, "too many requests");
        assert_eq!(body.retry_after_seconds, Some(17));
        assert!(!body.timestamp.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_unauthenticated_carries_login_redirect() -> TestResult {
        let service = Service::new(Router::with_path("reject").get(rejecting));

        let mut res = TestClient::get("http://example.com/reject")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        let body = res.take_json::<ErrorBody>().await?;

        assert_eq!(body.code, "UNAUTHENTICATED");
        assert_eq!(body.redirect_to.as_deref(), Some("/login"));

        Ok(())
    }

    #[tokio::test]
    async fn test_validation_omits_optional_fields() -> TestResult {
        let mut res = Response::new();

        ApiError::validation("quantity must be between 1 and 99").render(&mut res);

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let raw = res.take_string().await?;

        assert!(raw.contains("\"code\":\"VALIDATION\""));
        assert!(!raw.contains("redirect_to"));
        assert!(!raw.contains("retry_after_seconds"));

        Ok(())
    }

    #[tokio::test]
    async fn test_catcher_wraps_unmatched_routes() -> TestResult {
        let service = Service::new(Router::with_path("known").get(failing))
            .catcher(Catcher::default().hoop(catch_unhandled));

        let mut res = TestClient::get("http://example.com/unknown")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body = res.take_json::<ErrorBody>().await?;

        assert_eq!(body.code, "NOT_FOUND");

        Ok(())
    }
}
