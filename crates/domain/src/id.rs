//! Typed identifier newtypes backed by UUIDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }

            /// Parse user input (a path segment, a query value).
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::InvalidId`] when `value` is not a UUID.
            pub fn parse_input(value: &str) -> Result<Self, ValidationError> {
                Self::from_str(value.trim()).map_err(|_| ValidationError::InvalidId)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`User`](crate::user::User).
    UserId
);

define_id!(
    /// Unique identifier for a [`Customer`](crate::customer::Customer) profile.
    CustomerId
);

define_id!(
    /// Unique identifier for a [`Dealer`](crate::dealer::Dealer) profile.
    DealerId
);

define_id!(
    /// Unique identifier for a [`Brand`](crate::catalog::Brand).
    BrandId
);

define_id!(
    /// Unique identifier for a [`Tyre`](crate::catalog::Tyre).
    TyreId
);

define_id!(
    /// Unique identifier for an [`Order`](crate::order::Order).
    OrderId
);

define_id!(
    /// Unique identifier for an [`OrderItem`](crate::order::OrderItem).
    OrderItemId
);

define_id!(
    /// Unique identifier for a [`Review`](crate::review::Review).
    ReviewId
);

define_id!(
    /// Unique identifier for a [`ServiceBooking`](crate::booking::ServiceBooking).
    ServiceBookingId
);
