//! Auth repository.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, types::Json};

use crate::auth::models::{NewUser, SessionData, User, UserCredentials, UserUuid};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_CREDENTIALS_BY_EMAIL_SQL: &str = include_str!("sql/find_credentials_by_email.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_SESSION_SQL: &str = include_str!("sql/find_session.sql");
const DELETE_SESSION_SQL: &str = include_str!("sql/delete_session.sql");
const DELETE_EXPIRED_SESSIONS_SQL: &str = include_str!("sql/delete_expired_sessions.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_user(&self, user: &NewUser) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn get_user(&self, user: UserUuid) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn create_session(
        &self,
        token_hash: &str,
        data: &SessionData,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_SESSION_SQL)
            .bind(token_hash)
            .bind(Json(data))
            .bind(SqlxTimestamp::from(expires_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Look up an unexpired session by its token digest.
    pub(crate) async fn find_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<SessionData>, sqlx::Error> {
        let row = query(FIND_SESSION_SQL)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| {
            row.try_get::<Json<SessionData>, _>("data")
                .map(|Json(data)| data)
        })
        .transpose()
    }

    pub(crate) async fn delete_session(&self, token_hash: &str) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_SESSION_SQL)
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn delete_expired_sessions(&self) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_EXPIRED_SESSIONS_SQL)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            password_hash: row.try_get("password_hash")?,
        })
    }
}
