//! `SQLite` implementation of [`CustomerRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use tyrehub_app::ports::CustomerRepository;
use tyrehub_domain::customer::Customer;
use tyrehub_domain::error::TyreHubError;
use tyrehub_domain::id::{CustomerId, UserId};

use crate::codec::{decode_time, encode_time};
use crate::error::StorageError;

struct Wrapper(Customer);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let user_id: uuid::Uuid = row.try_get("user_id")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Customer {
            id: CustomerId::from_uuid(id),
            user_id: UserId::from_uuid(user_id),
            address: row.try_get("address")?,
            loyalty_points: row.try_get("loyalty_points")?,
            created_at: decode_time(&created_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO customers (id, user_id, address, loyalty_points, created_at)
    VALUES (?, ?, ?, ?, ?)
";
const SELECT_BY_USER: &str = "SELECT * FROM customers WHERE user_id = ?";
const COUNT: &str = "SELECT COUNT(*) FROM customers";

/// `SQLite`-backed customer profile repository.
pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for SqliteCustomerRepository {
    fn create(
        &self,
        customer: Customer,
    ) -> impl Future<Output = Result<Customer, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(customer.id.as_uuid())
                .bind(customer.user_id.as_uuid())
                .bind(&customer.address)
                .bind(customer.loyalty_points)
                .bind(encode_time(customer.created_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(customer)
        }
    }

    fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Customer>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_USER)
                .bind(user_id.as_uuid())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
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
}
