//! Service bookings: a customer's request for fitting, balancing, etc.
//!
//! A booking can be cancelled by its owner only while it is still
//! [`BookingStatus::Pending`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{ServiceBookingId, UserId};
use crate::time::Timestamp;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ValidationError::InvalidValue {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// A scheduled-service request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBooking {
    pub id: ServiceBookingId,
    pub user_id: UserId,
    pub service_type: String,
    pub vehicle: Option<String>,
    pub scheduled_at: Timestamp,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ServiceBooking {
    /// Create a pending booking for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for a blank service type and
    /// [`ValidationError::ScheduledInPast`] when `scheduled_at` is not after `now`.
    pub fn schedule(
        user_id: UserId,
        service_type: &str,
        scheduled_at: Timestamp,
        vehicle: Option<String>,
        notes: Option<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let service_type = service_type.trim();
        if service_type.is_empty() {
            return Err(ValidationError::MissingField("service_type"));
        }
        if scheduled_at <= now {
            return Err(ValidationError::ScheduledInPast);
        }
        Ok(Self {
            id: ServiceBookingId::new(),
            user_id,
            service_type: service_type.to_string(),
            vehicle: vehicle.filter(|v| !v.trim().is_empty()),
            scheduled_at,
            notes: notes.filter(|n| !n.trim().is_empty()),
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Move a pending booking to [`BookingStatus::Cancelled`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BookingNotCancellable`] for any other
    /// status; the booking is left untouched.
    pub fn cancel(&mut self, now: Timestamp) -> Result<(), ValidationError> {
        if self.status != BookingStatus::Pending {
            return Err(ValidationError::BookingNotCancellable(self.status));
        }
        self.status = BookingStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{hours_after, now};

    fn pending() -> ServiceBooking {
        let ts = now();
        ServiceBooking::schedule(
            UserId::new(),
            "wheel alignment",
            hours_after(ts, 48),
            Some("VW Golf".to_string()),
            None,
            ts,
        )
        .unwrap()
    }

    #[test]
    fn should_schedule_pending_booking() {
        let booking = pending();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.service_type, "wheel alignment");
        assert_eq!(booking.created_at, booking.updated_at);
    }

    #[test]
    fn should_reject_booking_in_the_past() {
        let ts = now();
        let result = ServiceBooking::schedule(UserId::new(), "fitting", ts, None, None, ts);
        assert_eq!(result, Err(ValidationError::ScheduledInPast));
    }

    #[test]
    fn should_reject_blank_service_type() {
        let ts = now();
        let result =
            ServiceBooking::schedule(UserId::new(), " ", hours_after(ts, 1), None, None, ts);
        assert_eq!(result, Err(ValidationError::MissingField("service_type")));
    }

    #[test]
    fn should_cancel_pending_booking() {
        let mut booking = pending();
        let later = hours_after(booking.created_at, 1);
        booking.cancel(later).unwrap();
        assert_eq!(booking.status, BookingStatus::Cancelled);
        assert_eq!(booking.updated_at, later);
    }

    #[test]
    fn should_leave_status_unchanged_when_not_pending() {
        for status in [
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            let mut booking = pending();
            booking.status = status;
            let before = booking.updated_at;

            let result = booking.cancel(now());

            assert_eq!(result, Err(ValidationError::BookingNotCancellable(status)));
            assert_eq!(booking.status, status);
            assert_eq!(booking.updated_at, before);
        }
    }

    #[test]
    fn should_check_ownership() {
        let booking = pending();
        assert!(booking.is_owned_by(booking.user_id));
        assert!(!booking.is_owned_by(UserId::new()));
    }
}
