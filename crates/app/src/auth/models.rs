//! Auth data models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Registered customer account. The password hash never leaves the
/// repository layer.
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: UserUuid,
    pub email: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New account persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// Credential row loaded during login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub uuid: UserUuid,
    pub password_hash: String,
}

/// Payload serialized into the session store's JSONB blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_uuid: Uuid,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: Timestamp,
}
