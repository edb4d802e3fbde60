//! `SQLite` implementation of [`DealerRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use tyrehub_app::ports::DealerRepository;
use tyrehub_domain::dealer::Dealer;
use tyrehub_domain::error::TyreHubError;
use tyrehub_domain::id::{DealerId, UserId};

use crate::codec::{decode_time, encode_time};
use crate::error::StorageError;

struct Wrapper(Dealer);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Dealer> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let user_id: uuid::Uuid = row.try_get("user_id")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Dealer {
            id: DealerId::from_uuid(id),
            user_id: UserId::from_uuid(user_id),
            business_name: row.try_get("business_name")?,
            business_address: row.try_get("business_address")?,
            tax_number: row.try_get("tax_number")?,
            verified: row.try_get("verified")?,
            created_at: decode_time(&created_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO dealers (id, user_id, business_name, business_address, tax_number, verified, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM dealers WHERE id = ?";
const SELECT_BY_USER: &str = "SELECT * FROM dealers WHERE user_id = ?";
const SELECT_ALL: &str = "SELECT * FROM dealers ORDER BY created_at DESC";
const UPDATE: &str = r"
    UPDATE dealers
    SET business_name = ?, business_address = ?, tax_number = ?, verified = ?
    WHERE id = ?
";
const COUNT: &str = "SELECT COUNT(*) FROM dealers";

/// `SQLite`-backed dealer profile repository.
pub struct SqliteDealerRepository {
    pool: SqlitePool,
}

impl SqliteDealerRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DealerRepository for SqliteDealerRepository {
    fn create(&self, dealer: Dealer) -> impl Future<Output = Result<Dealer, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(dealer.id.as_uuid())
                .bind(dealer.user_id.as_uuid())
                .bind(&dealer.business_name)
                .bind(&dealer.business_address)
                .bind(&dealer.tax_number)
                .bind(dealer.verified)
                .bind(encode_time(dealer.created_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(dealer)
        }
    }

    fn get_by_id(
        &self,
        id: DealerId,
    ) -> impl Future<Output = Result<Option<Dealer>, TyreHubError>> + Send {
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

    fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Dealer>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_USER)
                .bind(user_id.as_uuid())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Dealer>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, dealer: Dealer) -> impl Future<Output = Result<Dealer, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&dealer.business_name)
                .bind(&dealer.business_address)
                .bind(&dealer.tax_number)
                .bind(dealer.verified)
                .bind(dealer.id.as_uuid())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(dealer)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use tyrehub_domain::user::Role;

    #[tokio::test]
    async fn should_create_unverified_dealer_and_find_by_user() {
        let pool = fixtures::pool().await;
        let user = fixtures::seed_user(&pool, "shop@example.com", Role::Dealer).await;
        let repo = SqliteDealerRepository::new(pool);

        let dealer = repo
            .create(
                Dealer::for_user(user.id, "Rubber Road", None, Some("GB123".to_string())).unwrap(),
            )
            .await
            .unwrap();

        let fetched = repo.find_by_user_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched, dealer);
        assert!(!fetched.verified);
        assert_eq!(fetched.tax_number.as_deref(), Some("GB123"));
    }

    #[tokio::test]
    async fn should_persist_verification_on_update() {
        let pool = fixtures::pool().await;
        let user = fixtures::seed_user(&pool, "shop@example.com", Role::Dealer).await;
        let mut dealer = fixtures::seed_dealer(&pool, user.id).await;
        let repo = SqliteDealerRepository::new(pool);

        dealer.verified = true;
        repo.update(dealer.clone()).await.unwrap();

        let fetched = repo.get_by_id(dealer.id).await.unwrap().unwrap();
        assert!(fetched.verified);
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn should_return_none_when_dealer_not_found() {
        let repo = SqliteDealerRepository::new(fixtures::pool().await);
        assert!(repo.get_by_id(DealerId::new()).await.unwrap().is_none());
    }
}
