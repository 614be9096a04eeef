//! Webhook signature verification.
//!
//! The provider signs each delivery with `t=<unix seconds>,v1=<hex hmac>`
//! where the HMAC-SHA256 input is `"{t}.{raw body}"`. Verification recomputes
//! the digest over the exact bytes received, so callers must pass the body
//! before any parsing touches it.

use hmac::{Hmac, Mac};
use jiff::Timestamp;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted age (or clock skew) of a signed delivery, in seconds.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature header is malformed")]
    MalformedHeader,

    #[error("signature timestamp is outside the accepted window")]
    StaleTimestamp,

    #[error("signature does not match the payload")]
    Mismatch,
}

/// Verify a signature header against the raw request body.
///
/// # Errors
///
/// Returns an error when the header cannot be parsed, the timestamp falls
/// outside `tolerance_secs` of `now`, or the digest does not match.
pub fn verify(
    secret: &str,
    header: &str,
    payload: &[u8],
    tolerance_secs: i64,
    now: Timestamp,
) -> Result<(), SignatureError> {
    let (timestamp, provided_hex) = parse_header(header)?;

    if (now.as_second() - timestamp).abs() > tolerance_secs {
        return Err(SignatureError::StaleTimestamp);
    }

    let provided = hex::decode(provided_hex).map_err(|_| SignatureError::MalformedHeader)?;

    let mut mac = mac_for(secret, timestamp, payload)?;

    mac.verify_slice(&provided)
        .map_err(|_| SignatureError::Mismatch)?;

    Ok(())
}

/// Compute the `v1` digest for a payload at a timestamp.
///
/// The server only ever verifies; this exists for tests and tooling that
/// need to construct valid deliveries.
///
/// # Errors
///
/// Returns an error when the MAC cannot be keyed.
pub fn sign(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String, SignatureError> {
    let mac = mac_for(secret, timestamp, payload)?;

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Format a complete signature header for a payload at a timestamp.
///
/// # Errors
///
/// Returns an error when the MAC cannot be keyed.
pub fn header_for(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String, SignatureError> {
    let signature = sign(secret, timestamp, payload)?;

    Ok(format!("t={timestamp},v1={signature}"))
}

fn mac_for(secret: &str, timestamp: i64, payload: &[u8]) -> Result<HmacSha256, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::MalformedHeader)?;

    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(payload);

    Ok(mac)
}

fn parse_header(header: &str) -> Result<(i64, &str), SignatureError> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            return Err(SignatureError::MalformedHeader);
        };

        match key {
            "t" => {
                timestamp =
                    Some(value.parse::<i64>().map_err(|_| SignatureError::MalformedHeader)?);
            }
            "v1" => signature = Some(value),
            // Ignore signature schemes we do not verify (e.g. v0).
            _ => {}
        }
    }

    match (timestamp, signature) {
        (Some(timestamp), Some(signature)) => Ok((timestamp, signature)),
        _ => Err(SignatureError::MalformedHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const PAYLOAD: &[u8] = br#"{"id":"evt_1","type":"payment_intent.succeeded"}"#;

    fn now() -> Timestamp {
        Timestamp::now()
    }

    #[test]
    fn valid_signature_verifies() -> Result<(), SignatureError> {
        let timestamp = now().as_second();
        let header = header_for(SECRET, timestamp, PAYLOAD)?;

        verify(SECRET, &header, PAYLOAD, DEFAULT_TOLERANCE_SECS, now())
    }

    #[test]
    fn wrong_secret_is_rejected() -> Result<(), SignatureError> {
        let timestamp = now().as_second();
        let header = header_for("whsec_other", timestamp, PAYLOAD)?;

        let result = verify(SECRET, &header, PAYLOAD, DEFAULT_TOLERANCE_SECS, now());

        assert_eq!(result, Err(SignatureError::Mismatch));

        Ok(())
    }

    #[test]
    fn tampered_payload_is_rejected() -> Result<(), SignatureError> {
        let timestamp = now().as_second();
        let header = header_for(SECRET, timestamp, PAYLOAD)?;

        let tampered = br#"{"id":"evt_1","type":"payment_intent.payment_failed"}"#;

        let result = verify(SECRET, &header, tampered, DEFAULT_TOLERANCE_SECS, now());

        assert_eq!(result, Err(SignatureError::Mismatch));

        Ok(())
    }

    #[test]
    fn stale_timestamp_is_rejected() -> Result<(), SignatureError> {
        let timestamp = now().as_second() - DEFAULT_TOLERANCE_SECS - 10;
        let header = header_for(SECRET, timestamp, PAYLOAD)?;

        let result = verify(SECRET, &header, PAYLOAD, DEFAULT_TOLERANCE_SECS, now());

        assert_eq!(result, Err(SignatureError::StaleTimestamp));

        Ok(())
    }

    #[test]
    fn future_timestamp_beyond_tolerance_is_rejected() -> Result<(), SignatureError> {
        let timestamp = now().as_second() + DEFAULT_TOLERANCE_SECS + 10;
        let header = header_for(SECRET, timestamp, PAYLOAD)?;

        let result = verify(SECRET, &header, PAYLOAD, DEFAULT_TOLERANCE_SECS, now());

        assert_eq!(result, Err(SignatureError::StaleTimestamp));

        Ok(())
    }

    #[test]
    fn malformed_headers_are_rejected() {
        for header in [
            "",
            "v1=abc",
            "t=123",
            "t=notanumber,v1=abc",
            "complete garbage",
        ] {
            let result = verify(SECRET, header, PAYLOAD, DEFAULT_TOLERANCE_SECS, now());

            assert_eq!(
                result,
                Err(SignatureError::MalformedHeader),
                "header {header:?} should be malformed"
            );
        }
    }

    #[test]
    fn non_hex_signature_is_rejected() {
        let timestamp = now().as_second();
        let header = format!("t={timestamp},v1=zzzz");

        let result = verify(SECRET, &header, PAYLOAD, DEFAULT_TOLERANCE_SECS, now());

        assert_eq!(result, Err(SignatureError::MalformedHeader));
    }

    #[test]
    fn unknown_schemes_are_ignored() -> Result<(), SignatureError> {
        let timestamp = now().as_second();
        let signature = sign(SECRET, timestamp, PAYLOAD)?;
        let header = format!("t={timestamp},v0=ignored,v1={signature}");

        verify(SECRET, &header, PAYLOAD, DEFAULT_TOLERANCE_SECS, now())
    }

    #[test]
    fn binary_payloads_sign_and_verify() -> Result<(), SignatureError> {
        let payload = [0_u8, 159, 146, 150, 255];
        let timestamp = now().as_second();
        let header = header_for(SECRET, timestamp, &payload)?;

        verify(SECRET, &header, &payload, DEFAULT_TOLERANCE_SECS, now())
    }
}
