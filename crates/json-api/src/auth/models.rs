//! Auth API models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vermeil_app::auth::{IssuedSession, User};

/// Account data returned to its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            email: user.email,
            name: user.name,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Session summary returned on login. The token itself only travels in the
/// cookie.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub expires_at: String,
}

impl From<&IssuedSession> for SessionResponse {
    fn from(session: &IssuedSession) -> Self {
        Self {
            expires_at: session.expires_at.to_string(),
        }
    }
}
