//! `SQLite` implementation of [`SessionRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use tyrehub_app::ports::SessionRepository;
use tyrehub_domain::error::TyreHubError;
use tyrehub_domain::id::UserId;
use tyrehub_domain::session::Session;

use crate::codec::{decode_time, encode_time};
use crate::error::StorageError;

struct Wrapper(Session);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let user_id: uuid::Uuid = row.try_get("user_id")?;
        let created_at: String = row.try_get("created_at")?;
        let expires_at: String = row.try_get("expires_at")?;

        Ok(Self(Session {
            token: row.try_get("token")?,
            user_id: UserId::from_uuid(user_id),
            created_at: decode_time(&created_at)?,
            expires_at: decode_time(&expires_at)?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_TOKEN: &str = "SELECT * FROM sessions WHERE token = ?";
const DELETE_BY_TOKEN: &str = "DELETE FROM sessions WHERE token = ?";

/// `SQLite`-backed session repository.
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SessionRepository for SqliteSessionRepository {
    fn create(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<Session, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(&session.token)
                .bind(session.user_id.as_uuid())
                .bind(encode_time(session.created_at))
                .bind(encode_time(session.expires_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(session)
        }
    }

    fn get(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Session>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        let token = token.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_TOKEN)
                .bind(token)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn delete(&self, token: &str) -> impl Future<Output = Result<(), TyreHubError>> + Send {
        let pool = self.pool.clone();
        let token = token.to_string();
        async move {
            sqlx::query(DELETE_BY_TOKEN)
                .bind(token)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
