//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::PgPool;
use tracing::info;

use crate::auth::{
    errors::AuthServiceError,
    models::{IssuedSession, NewUser, SessionData, User, UserUuid},
    password::{hash_password, verify_password},
    repository::PgAuthRepository,
    session::{format_session_token, generate_session_secret, parse_session_token},
};

/// How long an issued session stays valid.
pub const SESSION_LIFETIME: SignedDuration = SignedDuration::from_hours(14 * 24);

/// Hash verified against when the email is unknown, so login timing does not
/// reveal whether an address is registered.
const UNKNOWN_EMAIL_HASH: &str = "pbkdf2-sha256$100000$00000000000000000000000000000000$0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    async fn issue_session(&self, user: UserUuid) -> Result<IssuedSession, AuthServiceError> {
        let secret = generate_session_secret();
        let token = format_session_token(&secret);
        let expires_at = Timestamp::now() + SESSION_LIFETIME;

        self.repository
            .create_session(
                &secret.storage_digest(),
                &SessionData {
                    user_uuid: user.into_uuid(),
                },
                expires_at,
            )
            .await?;

        Ok(IssuedSession { token, expires_at })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AuthServiceError> {
        let password_hash = hash_password(password)?;

        let user = self
            .repository
            .create_user(&NewUser {
                uuid: UserUuid::new(),
                email: email.to_owned(),
                password_hash,
                name: name.to_owned(),
            })
            .await?;

        info!(user = %user.uuid, "registered new account");

        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError> {
        let credentials = self.repository.find_credentials_by_email(email).await?;

        // Run the full verification even for unknown emails so both failure
        // paths take the same time.
        let stored_hash = credentials
            .as_ref()
            .map_or(UNKNOWN_EMAIL_HASH, |credentials| &credentials.password_hash);

        let valid = verify_password(password, stored_hash)?;

        let Some(user) = credentials.filter(|_| valid).map(|c| c.uuid) else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        self.issue_session(user).await
    }

    async fn authenticate_session(&self, token: &str) -> Result<UserUuid, AuthServiceError> {
        let secret = parse_session_token(token).map_err(|_| AuthServiceError::NotFound)?;

        let data = self
            .repository
            .find_session(&secret.storage_digest())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        Ok(UserUuid::from_uuid(data.user_uuid))
    }

    async fn logout(&self, token: &str) -> Result<(), AuthServiceError> {
        let Ok(secret) = parse_session_token(token) else {
            return Ok(());
        };

        self.repository
            .delete_session(&secret.storage_digest())
            .await?;

        Ok(())
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, AuthServiceError> {
        self.repository
            .get_user(user)
            .await
            .map_err(AuthServiceError::from)
    }

    async fn sweep_expired_sessions(&self) -> Result<u64, AuthServiceError> {
        let removed = self.repository.delete_expired_sessions().await?;

        if removed > 0 {
            info!(removed, "swept expired sessions");
        }

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account. Emails are unique case-insensitively.
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AuthServiceError>;

    /// Verify credentials and issue a session token. Unknown emails and wrong
    /// passwords are indistinguishable to the caller.
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a session token to its user. Expired and unknown tokens both
    /// come back as `NotFound`.
    async fn authenticate_session(&self, token: &str) -> Result<UserUuid, AuthServiceError>;

    /// Remove the session behind a token. Unknown tokens are a no-op.
    async fn logout(&self, token: &str) -> Result<(), AuthServiceError>;

    /// Load account data for a known user.
    async fn get_user(&self, user: UserUuid) -> Result<User, AuthServiceError>;

    /// Delete expired sessions, returning how many were removed.
    async fn sweep_expired_sessions(&self) -> Result<u64, AuthServiceError>;
}
