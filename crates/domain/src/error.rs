//! Common error types used across the workspace.
//!
//! Each layer converts its own failures into [`TyreHubError`] through
//! `#[from]` or an explicit `From` impl; the HTTP adapter maps the variants
//! onto status codes.

use crate::booking::BookingStatus;
use crate::user::Role;

/// Boxed error coming from an external collaborator (database, hasher).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum TyreHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("unauthorized")]
    Unauthorized(#[from] AuthError),

    #[error("forbidden")]
    Forbidden(#[from] ForbiddenError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(#[source] BoxError),

    #[error("credential hashing error")]
    Credential(#[source] BoxError),
}

/// Input or state rejected by a domain rule.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("role {0} cannot register")]
    RoleNotAllowed(Role),

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("invalid id")]
    InvalidId,

    #[error("rating must be between 1 and 5")]
    InvalidRating(u8),

    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("order must contain at least one item")]
    EmptyOrder,

    #[error("scheduled time must be in the future")]
    ScheduledInPast,

    #[error("only pending bookings can be cancelled (status is {0})")]
    BookingNotCancellable(BookingStatus),
}

/// The caller has no usable session, or the session has the wrong role.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("unauthorized")]
    NotAuthenticated,

    #[error("unauthorized")]
    WrongRole { expected: Role, actual: Role },

    #[error("invalid credentials")]
    InvalidCredentials,
}

/// The caller is authenticated but does not own the record.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} belongs to another user")]
pub struct ForbiddenError {
    pub entity: &'static str,
}

/// A lookup by id found nothing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
