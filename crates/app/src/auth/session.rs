//! Session token generation, formatting, and parsing.
//!
//! The cookie carries `vs_<64 hex chars>`; only the SHA-256 digest of the
//! secret is ever persisted, so a leaked session table cannot be replayed.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroize;

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "vs";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

const SESSION_TOKEN_SECRET_HEX_CHARS: usize = SESSION_TOKEN_SECRET_BYTES * 2;

#[derive(Clone)]
pub struct SessionSecret {
    bytes: [u8; SESSION_TOKEN_SECRET_BYTES],
}

impl SessionSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    /// Hex-encoded SHA-256 digest of the secret, used as the storage key.
    #[must_use]
    pub fn storage_digest(&self) -> String {
        hex::encode(Sha256::digest(self.bytes))
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for SessionSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_session_secret() -> SessionSecret {
    let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    SessionSecret::from_bytes(secret)
}

#[must_use]
pub fn format_session_token(secret: &SessionSecret) -> String {
    format!("{SESSION_TOKEN_PREFIX}_{}", hex::encode(secret.bytes))
}

pub fn parse_session_token(token: &str) -> Result<SessionSecret, SessionTokenError> {
    let (prefix, secret_hex) = token
        .split_once('_')
        .ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX || secret_hex.len() != SESSION_TOKEN_SECRET_HEX_CHARS {
        return Err(SessionTokenError::InvalidFormat);
    }

    let mut decoded =
        hex::decode(secret_hex).map_err(|_| SessionTokenError::InvalidSecretEncoding)?;

    let bytes: [u8; SESSION_TOKEN_SECRET_BYTES] = decoded
        .as_slice()
        .try_into()
        .map_err(|_| SessionTokenError::InvalidSecretEncoding)?;

    decoded.zeroize();

    Ok(SessionSecret::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn generated_token_round_trips_through_parse() -> TestResult {
        let secret = generate_session_secret();
        let token = format_session_token(&secret);

        assert!(token.starts_with("vs_"));
        assert_eq!(token.len(), 3 + SESSION_TOKEN_SECRET_HEX_CHARS);

        let parsed = parse_session_token(&token)?;

        assert_eq!(parsed.storage_digest(), secret.storage_digest());

        Ok(())
    }

    #[test]
    fn storage_digest_differs_from_token() {
        let secret = generate_session_secret();
        let token = format_session_token(&secret);
        let digest = secret.storage_digest();

        assert_eq!(digest.len(), 64);
        assert!(!token.contains(&digest));
    }

    #[test]
    fn parse_rejects_malformed_tokens() {
        for token in [
            "",
            "vs",
            "vs_",
            "vs_deadbeef",
            "lt_0000000000000000000000000000000000000000000000000000000000000000",
            "vs-0000000000000000000000000000000000000000000000000000000000000000",
        ] {
            let result = parse_session_token(token);

            assert!(
                matches!(result, Err(SessionTokenError::InvalidFormat)),
                "expected InvalidFormat for {token:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_non_hex_secret() {
        let token = format!("vs_{}", "zz".repeat(SESSION_TOKEN_SECRET_BYTES));

        let result = parse_session_token(&token);

        assert!(
            matches!(result, Err(SessionTokenError::InvalidSecretEncoding)),
            "expected InvalidSecretEncoding, got {result:?}"
        );
    }

    #[test]
    fn debug_output_is_redacted() {
        let secret = generate_session_secret();

        assert_eq!(format!("{secret:?}"), "SessionSecret(**redacted**)");
    }
}
