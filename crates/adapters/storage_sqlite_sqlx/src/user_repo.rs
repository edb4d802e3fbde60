//! `SQLite` implementation of [`UserRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use tyrehub_app::ports::UserRepository;
use tyrehub_domain::error::TyreHubError;
use tyrehub_domain::id::UserId;
use tyrehub_domain::user::{Role, User};

use crate::codec::{decode_enum, decode_time, encode_time};
use crate::error::{StorageError, user_insert_error};

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let role: String = row.try_get("role")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(User {
            id: UserId::from_uuid(id),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            role: decode_enum(&role)?,
            password_hash: row.try_get("password_hash")?,
            created_at: decode_time(&created_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO users (id, name, email, phone, role, password_hash, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_BY_EMAIL: &str = "SELECT * FROM users WHERE email = ?";
const SELECT_ALL: &str = "SELECT * FROM users ORDER BY created_at DESC";
const COUNT: &str = "SELECT COUNT(*) FROM users";
const COUNT_BY_ROLE: &str = "SELECT COUNT(*) FROM users WHERE role = ?";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: User) -> impl Future<Output = Result<User, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(user.id.as_uuid())
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.phone)
                .bind(user.role.as_str())
                .bind(&user.password_hash)
                .bind(encode_time(user.created_at))
                .execute(&pool)
                .await
                .map_err(user_insert_error)?;

            Ok(user)
        }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_uuid())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        let email = email.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_EMAIL)
                .bind(email)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;
            Ok(count)
        }
    }

    fn count_by_role(&self, role: Role) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT_BY_ROLE)
                .bind(role.as_str())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;
            Ok(count)
        }
    }
}
