//! Password hashing and verification.
//!
//! PBKDF2-HMAC-SHA256 with a per-password random salt. Hashes are stored as
//! `pbkdf2-sha256$<iterations>$<salt hex>$<digest hex>` so the iteration
//! count can be raised later without invalidating existing accounts.

use hmac::Hmac;
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;
use thiserror::Error;

/// Scheme tag stored with every hash.
const SCHEME: &str = "pbkdf2-sha256";

/// Iteration count applied to newly created hashes.
const ITERATIONS: u32 = 100_000;

const SALT_BYTES: usize = 16;
const DIGEST_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("stored password hash is malformed")]
    MalformedHash,

    #[error("key derivation failed")]
    Derivation,
}

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns an error if key derivation fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt = [0_u8; SALT_BYTES];

    OsRng.fill_bytes(&mut salt);

    let digest = derive(password.as_bytes(), &salt, ITERATIONS)?;

    Ok(format!(
        "{SCHEME}${ITERATIONS}${}${}",
        hex::encode(salt),
        hex::encode(digest)
    ))
}

/// Verify a password against a stored hash.
///
/// The digest comparison is constant-time so verification leaks nothing
/// about how many bytes matched.
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed or derivation fails.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let mut parts = stored.split('$');

    let scheme = parts.next().ok_or(PasswordError::MalformedHash)?;
    let iterations = parts.next().ok_or(PasswordError::MalformedHash)?;
    let salt_hex = parts.next().ok_or(PasswordError::MalformedHash)?;
    let digest_hex = parts.next().ok_or(PasswordError::MalformedHash)?;

    if scheme != SCHEME || parts.next().is_some() {
        return Err(PasswordError::MalformedHash);
    }

    let iterations: u32 = iterations.parse().map_err(|_| PasswordError::MalformedHash)?;
    let salt = hex::decode(salt_hex).map_err(|_| PasswordError::MalformedHash)?;
    let expected = hex::decode(digest_hex).map_err(|_| PasswordError::MalformedHash)?;

    if iterations == 0 || salt.is_empty() || expected.len() != DIGEST_BYTES {
        return Err(PasswordError::MalformedHash);
    }

    let digest = derive(password.as_bytes(), &salt, iterations)?;

    Ok(constant_time_eq(&digest, &expected))
}

fn derive(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<[u8; DIGEST_BYTES], PasswordError> {
    let mut out = [0_u8; DIGEST_BYTES];

    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, &mut out)
        .map_err(|_| PasswordError::Derivation)?;

    Ok(out)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0_u8;

    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }

    diff == 0
}
