//! `SQLite` implementations of [`BrandRepository`] and [`TyreRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use tyrehub_app::ports::{BrandRepository, TyreRepository};
use tyrehub_domain::catalog::{Brand, Tyre};
use tyrehub_domain::error::TyreHubError;
use tyrehub_domain::id::{BrandId, TyreId};

use crate::codec::{decode_enum, decode_time, encode_time};
use crate::error::StorageError;

struct BrandRow(Brand);

impl<'r> FromRow<'r, SqliteRow> for BrandRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Brand {
            id: BrandId::from_uuid(id),
            name: row.try_get("name")?,
            country: row.try_get("country")?,
            created_at: decode_time(&created_at)?,
        }))
    }
}

struct TyreRow(Tyre);

impl<'r> FromRow<'r, SqliteRow> for TyreRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let brand_id: uuid::Uuid = row.try_get("brand_id")?;
        let season: String = row.try_get("season")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Tyre {
            id: TyreId::from_uuid(id),
            brand_id: BrandId::from_uuid(brand_id),
            name: row.try_get("name")?,
            size: row.try_get("size")?,
            season: decode_enum(&season)?,
            price_cents: row.try_get("price_cents")?,
            stock: row.try_get("stock")?,
            created_at: decode_time(&created_at)?,
        }))
    }
}

const INSERT_BRAND: &str = "INSERT INTO brands (id, name, country, created_at) VALUES (?, ?, ?, ?)";
const SELECT_BRANDS: &str = "SELECT * FROM brands ORDER BY name";
const COUNT_BRANDS: &str = "SELECT COUNT(*) FROM brands";

const INSERT_TYRE: &str = r"
    INSERT INTO tyres (id, brand_id, name, size, season, price_cents, stock, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_TYRE_BY_ID: &str = "SELECT * FROM tyres WHERE id = ?";
const SELECT_TYRES: &str = "SELECT * FROM tyres ORDER BY name";
const SELECT_TYRES_BY_BRAND: &str = "SELECT * FROM tyres WHERE brand_id = ? ORDER BY name";
const COUNT_TYRES: &str = "SELECT COUNT(*) FROM tyres";

/// `SQLite`-backed brand repository.
pub struct SqliteBrandRepository {
    pool: SqlitePool,
}

impl SqliteBrandRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl BrandRepository for SqliteBrandRepository {
    fn create(&self, brand: Brand) -> impl Future<Output = Result<Brand, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_BRAND)
                .bind(brand.id.as_uuid())
                .bind(&brand.name)
                .bind(&brand.country)
                .bind(encode_time(brand.created_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(brand)
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Brand>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<BrandRow> = sqlx::query_as(SELECT_BRANDS)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|r| r.0).collect())
        }
    }

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT_BRANDS)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;
            Ok(count)
        }
    }
}

/// `SQLite`-backed tyre repository.
pub struct SqliteTyreRepository {
    pool: SqlitePool,
}

impl SqliteTyreRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TyreRepository for SqliteTyreRepository {
    fn create(&self, tyre: Tyre) -> impl Future<Output = Result<Tyre, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_TYRE)
                .bind(tyre.id.as_uuid())
                .bind(tyre.brand_id.as_uuid())
                .bind(&tyre.name)
                .bind(&tyre.size)
                .bind(tyre.season.as_str())
                .bind(tyre.price_cents)
                .bind(tyre.stock)
                .bind(encode_time(tyre.created_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(tyre)
        }
    }

    fn get_by_id(
        &self,
        id: TyreId,
    ) -> impl Future<Output = Result<Option<Tyre>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<TyreRow> = sqlx::query_as(SELECT_TYRE_BY_ID)
                .bind(id.as_uuid())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|r| r.0))
        }
    }

    fn list(
        &self,
        brand_id: Option<BrandId>,
    ) -> impl Future<Output = Result<Vec<Tyre>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<TyreRow> = if let Some(brand_id) = brand_id {
                sqlx::query_as(SELECT_TYRES_BY_BRAND)
                    .bind(brand_id.as_uuid())
                    .fetch_all(&pool)
                    .await
            } else {
                sqlx::query_as(SELECT_TYRES).fetch_all(&pool).await
            }
            .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|r| r.0).collect())
        }
    }

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT_TYRES)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;
            Ok(count)
        }
    }
}
