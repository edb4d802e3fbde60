//! `SQLite` implementation of [`ReviewRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use tyrehub_app::ports::ReviewRepository;
use tyrehub_domain::error::TyreHubError;
use tyrehub_domain::id::{ReviewId, TyreId, UserId};
use tyrehub_domain::review::Review;

use crate::codec::{decode_time, encode_time};
use crate::error::StorageError;

struct Wrapper(Review);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let user_id: uuid::Uuid = row.try_get("user_id")?;
        let tyre_id: uuid::Uuid = row.try_get("tyre_id")?;
        let rating: i64 = row.try_get("rating")?;
        let created_at: String = row.try_get("created_at")?;

        let rating = u8::try_from(rating).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Review {
            id: ReviewId::from_uuid(id),
            user_id: UserId::from_uuid(user_id),
            tyre_id: TyreId::from_uuid(tyre_id),
            rating,
            comment: row.try_get("comment")?,
            created_at: decode_time(&created_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO reviews (id, user_id, tyre_id, rating, comment, created_at)
    VALUES (?, ?, ?, ?, ?, ?)
";
const SELECT_BY_TYRE: &str = "SELECT * FROM reviews WHERE tyre_id = ? ORDER BY created_at DESC";
const COUNT: &str = "SELECT COUNT(*) FROM reviews";
const COUNT_BY_USER: &str = "SELECT COUNT(*) FROM reviews WHERE user_id = ?";

/// `SQLite`-backed review repository.
pub struct SqliteReviewRepository {
    pool: SqlitePool,
}

impl SqliteReviewRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ReviewRepository for SqliteReviewRepository {
    fn create(&self, review: Review) -> impl Future<Output = Result<Review, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(review.id.as_uuid())
                .bind(review.user_id.as_uuid())
                .bind(review.tyre_id.as_uuid())
                .bind(i64::from(review.rating))
                .bind(&review.comment)
                .bind(encode_time(review.created_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(review)
        }
    }

    fn find_by_tyre(
        &self,
        tyre_id: TyreId,
    ) -> impl Future<Output = Result<Vec<Review>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_TYRE)
                .bind(tyre_id.as_uuid())
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

    fn count_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT_BY_USER)
                .bind(user_id.as_uuid())
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
    async fn should_store_reviews_and_count_them() {
        let pool = fixtures::pool().await;
        let dana = fixtures::seed_user(&pool, "dana@example.com", Role::Customer).await;
        let eve = fixtures::seed_user(&pool, "eve@example.com", Role::Customer).await;
        let tyre = fixtures::seed_tyre(&pool, "Ecopia EP150", 7_500).await;
        let repo = SqliteReviewRepository::new(pool);

        let review = Review::new(dana.id, tyre.id, 5, Some("Quiet and grippy".to_string())).unwrap();
        repo.create(review.clone()).await.unwrap();
        repo.create(Review::new(eve.id, tyre.id, 3, None).unwrap())
            .await
            .unwrap();

        let reviews = repo.find_by_tyre(tyre.id).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews.contains(&review));
        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.count_by_user(dana.id).await.unwrap(), 1);
        assert!(repo.find_by_tyre(TyreId::new()).await.unwrap().is_empty());
    }
}
