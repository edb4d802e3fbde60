//! `SQLite` implementation of [`ServiceBookingRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use tyrehub_app::ports::ServiceBookingRepository;
use tyrehub_domain::booking::{BookingStatus, ServiceBooking};
use tyrehub_domain::error::TyreHubError;
use tyrehub_domain::id::{ServiceBookingId, UserId};
use tyrehub_domain::time::Timestamp;

use crate::codec::{decode_enum, decode_time, encode_time};
use crate::error::StorageError;

struct Wrapper(ServiceBooking);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<ServiceBooking> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let user_id: uuid::Uuid = row.try_get("user_id")?;
        let scheduled_at: String = row.try_get("scheduled_at")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(ServiceBooking {
            id: ServiceBookingId::from_uuid(id),
            user_id: UserId::from_uuid(user_id),
            service_type: row.try_get("service_type")?,
            vehicle: row.try_get("vehicle")?,
            scheduled_at: decode_time(&scheduled_at)?,
            notes: row.try_get("notes")?,
            status: decode_enum(&status)?,
            created_at: decode_time(&created_at)?,
            updated_at: decode_time(&updated_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO service_bookings
        (id, user_id, service_type, vehicle, scheduled_at, notes, status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM service_bookings WHERE id = ?";
const SELECT_BY_USER: &str =
    "SELECT * FROM service_bookings WHERE user_id = ? ORDER BY scheduled_at DESC";
const UPDATE: &str =
    "UPDATE service_bookings SET status = ?, notes = ?, updated_at = ? WHERE id = ?";
const COUNT_BY_STATUS: &str = "SELECT COUNT(*) FROM service_bookings WHERE status = ?";
const COUNT_UPCOMING: &str = r"
    SELECT COUNT(*) FROM service_bookings
    WHERE user_id = ? AND scheduled_at >= ? AND status IN (?, ?)
";

/// `SQLite`-backed service booking repository.
pub struct SqliteServiceBookingRepository {
    pool: SqlitePool,
}

impl SqliteServiceBookingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ServiceBookingRepository for SqliteServiceBookingRepository {
    fn create(
        &self,
        booking: ServiceBooking,
    ) -> impl Future<Output = Result<ServiceBooking, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(booking.id.as_uuid())
                .bind(booking.user_id.as_uuid())
                .bind(&booking.service_type)
                .bind(&booking.vehicle)
                .bind(encode_time(booking.scheduled_at))
                .bind(&booking.notes)
                .bind(booking.status.as_str())
                .bind(encode_time(booking.created_at))
                .bind(encode_time(booking.updated_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(booking)
        }
    }

    fn get_by_id(
        &self,
        id: ServiceBookingId,
    ) -> impl Future<Output = Result<Option<ServiceBooking>, TyreHubError>> + Send {
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

    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<ServiceBooking>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_USER)
                .bind(user_id.as_uuid())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        booking: ServiceBooking,
    ) -> impl Future<Output = Result<ServiceBooking, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(booking.status.as_str())
                .bind(&booking.notes)
                .bind(encode_time(booking.updated_at))
                .bind(booking.id.as_uuid())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(booking)
        }
    }

    fn count_by_status(
        &self,
        status: BookingStatus,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT_BY_STATUS)
                .bind(status.as_str())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;
            Ok(count)
        }
    }

    fn count_upcoming_for_user(
        &self,
        user_id: UserId,
        now: Timestamp,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT_UPCOMING)
                .bind(user_id.as_uuid())
                .bind(encode_time(now))
                .bind(BookingStatus::Pending.as_str())
                .bind(BookingStatus::Confirmed.as_str())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;
            Ok(count)
        }
    }
}
