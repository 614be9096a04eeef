//! Depot extensions.

use std::any::Any;

use salvo::Depot;
use vermeil_app::auth::UserUuid;

use crate::errors::ApiError;

/// Depot key the session middleware stores the authenticated user under.
const USER_UUID_KEY: &str = "vermeil.user_uuid";

/// Convenience methods for request-scoped values.
pub(crate) trait DepotExt {
    /// Obtain an injected value, mapping absence to a 500.
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    /// Record the authenticated user for downstream handlers.
    fn insert_user_uuid(&mut self, user: UserUuid);

    /// The authenticated user, or the 401 the middleware renders when no
    /// session was established.
    fn user_uuid_or_401(&self) -> Result<UserUuid, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, ApiError> {
        self.get::<UserUuid>(USER_UUID_KEY)
            .copied()
            .map_err(|_ignored| ApiError::unauthenticated())
    }
}
