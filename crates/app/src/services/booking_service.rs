//! Booking service: scheduling and cancelling workshop appointments.

use std::sync::Arc;

use tyrehub_domain::booking::ServiceBooking;
use tyrehub_domain::error::{ForbiddenError, NotFoundError, TyreHubError, ValidationError};
use tyrehub_domain::id::ServiceBookingId;
use tyrehub_domain::session::SessionUser;
use tyrehub_domain::time::{Timestamp, now};

use crate::ports::{ServiceBookingRepository, Storage};

/// Booking request as submitted.
#[derive(Debug, Default, Clone)]
pub struct NewBooking {
    pub service_type: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub vehicle: Option<String>,
    pub notes: Option<String>,
}

/// Application service for service bookings. Any signed-in role may book.
pub struct BookingService<S> {
    storage: Arc<S>,
}

impl<S: Storage> BookingService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Schedule a pending booking for the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Validation`] when the service type or time is
    /// missing, or the time is not in the future.
    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id))]
    pub async fn create(
        &self,
        caller: &SessionUser,
        request: NewBooking,
    ) -> Result<ServiceBooking, TyreHubError> {
        let service_type = request
            .service_type
            .ok_or(ValidationError::MissingField("service_type"))?;
        let scheduled_at = request
            .scheduled_at
            .ok_or(ValidationError::MissingField("scheduled_at"))?;
        let booking = ServiceBooking::schedule(
            caller.user_id,
            &service_type,
            scheduled_at,
            request.vehicle,
            request.notes,
            now(),
        )?;
        let booking = self.storage.bookings().create(booking).await?;
        tracing::info!(booking_id = %booking.id, "service booked");
        Ok(booking)
    }

    /// The caller's bookings, latest appointment first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_for_user(
        &self,
        caller: &SessionUser,
    ) -> Result<Vec<ServiceBooking>, TyreHubError> {
        self.storage.bookings().find_by_user(caller.user_id).await
    }

    /// Cancel one of the caller's pending bookings.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::NotFound`] for an unknown id,
    /// [`TyreHubError::Forbidden`] when the booking belongs to someone
    /// else, and [`TyreHubError::Validation`] when it is no longer pending.
    #[tracing::instrument(skip(self, caller))]
    pub async fn cancel(
        &self,
        caller: &SessionUser,
        id: ServiceBookingId,
    ) -> Result<ServiceBooking, TyreHubError> {
        let mut booking = self
            .storage
            .bookings()
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "ServiceBooking",
                id: id.to_string(),
            })?;
        if !booking.is_owned_by(caller.user_id) {
            return Err(ForbiddenError {
                entity: "ServiceBooking",
            }
            .into());
        }
        booking.cancel(now())?;
        let booking = self.storage.bookings().update(booking).await?;
        tracing::info!(booking_id = %booking.id, "booking cancelled");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tyrehub_domain::booking::BookingStatus;
    use tyrehub_domain::time::hours_after;
    use tyrehub_domain::user::Role;

    use crate::testing::{InMemoryStorage, user_with_role};

    fn make_service() -> (BookingService<InMemoryStorage>, Arc<InMemoryStorage>) {
        let storage = Arc::new(InMemoryStorage::default());
        (BookingService::new(Arc::clone(&storage)), storage)
    }

    fn caller(storage: &InMemoryStorage, email: &str) -> SessionUser {
        SessionUser::from(&user_with_role(storage, email, Role::Customer))
    }

    fn tomorrow() -> NewBooking {
        NewBooking {
            service_type: Some("tyre fitting".to_string()),
            scheduled_at: Some(hours_after(now(), 24)),
            vehicle: Some("VW Golf".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn should_create_pending_booking() {
        let (svc, storage) = make_service();
        let dana = caller(&storage, "dana@example.com");

        let booking = svc.create(&dana, tomorrow()).await.unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.user_id, dana.user_id);
        assert!(storage.stored_booking(booking.id).is_some());
    }

    #[tokio::test]
    async fn should_require_service_type_and_time() {
        let (svc, storage) = make_service();
        let dana = caller(&storage, "dana@example.com");

        let no_type = NewBooking {
            service_type: None,
            ..tomorrow()
        };
        assert!(matches!(
            svc.create(&dana, no_type).await,
            Err(TyreHubError::Validation(ValidationError::MissingField("service_type")))
        ));

        let no_time = NewBooking {
            scheduled_at: None,
            ..tomorrow()
        };
        assert!(matches!(
            svc.create(&dana, no_time).await,
            Err(TyreHubError::Validation(ValidationError::MissingField("scheduled_at")))
        ));
    }

    #[tokio::test]
    async fn should_reject_booking_in_the_past() {
        let (svc, storage) = make_service();
        let dana = caller(&storage, "dana@example.com");
        let past = NewBooking {
            scheduled_at: Some(now() - chrono::Duration::hours(1)),
            ..tomorrow()
        };

        assert!(matches!(
            svc.create(&dana, past).await,
            Err(TyreHubError::Validation(ValidationError::ScheduledInPast))
        ));
    }

    #[tokio::test]
    async fn should_list_only_callers_bookings() {
        let (svc, storage) = make_service();
        let dana = caller(&storage, "dana@example.com");
        let eve = caller(&storage, "eve@example.com");
        svc.create(&dana, tomorrow()).await.unwrap();
        svc.create(&eve, tomorrow()).await.unwrap();

        let bookings = svc.list_for_user(&dana).await.unwrap();

        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].user_id, dana.user_id);
    }

    #[tokio::test]
    async fn should_cancel_own_pending_booking() {
        let (svc, storage) = make_service();
        let dana = caller(&storage, "dana@example.com");
        let booking = svc.create(&dana, tomorrow()).await.unwrap();

        let cancelled = svc.cancel(&dana, booking.id).await.unwrap();

        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(
            storage.stored_booking(booking.id).unwrap().status,
            BookingStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn should_refuse_to_cancel_non_pending_booking() {
        let (svc, storage) = make_service();
        let dana = caller(&storage, "dana@example.com");
        for status in [
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            let ts = now();
            let mut booking =
                ServiceBooking::schedule(dana.user_id, "rotation", hours_after(ts, 5), None, None, ts)
                    .unwrap();
            booking.status = status;
            let booking = storage.insert_booking(booking);

            let result = svc.cancel(&dana, booking.id).await;

            assert!(matches!(
                result,
                Err(TyreHubError::Validation(ValidationError::BookingNotCancellable(s))) if s == status
            ));
            assert_eq!(storage.stored_booking(booking.id).unwrap().status, status);
        }
    }

    #[tokio::test]
    async fn should_forbid_cancelling_someone_elses_booking() {
        let (svc, storage) = make_service();
        let dana = caller(&storage, "dana@example.com");
        let eve = caller(&storage, "eve@example.com");
        let booking = svc.create(&dana, tomorrow()).await.unwrap();

        let result = svc.cancel(&eve, booking.id).await;

        assert!(matches!(result, Err(TyreHubError::Forbidden(_))));
        assert_eq!(
            storage.stored_booking(booking.id).unwrap().status,
            BookingStatus::Pending
        );
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_booking() {
        let (svc, storage) = make_service();
        let dana = caller(&storage, "dana@example.com");

        let result = svc.cancel(&dana, ServiceBookingId::new()).await;

        assert!(matches!(result, Err(TyreHubError::NotFound(_))));
    }
}
