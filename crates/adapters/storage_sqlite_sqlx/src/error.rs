//! Storage-specific error type wrapping sqlx errors.

use tyrehub_domain::error::{TyreHubError, ValidationError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StorageError {
    fn is_unique_violation(&self) -> bool {
        matches!(self, Self::Database(sqlx::Error::Database(db)) if db.is_unique_violation())
    }
}

impl From<StorageError> for TyreHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Map an insert into `users` onto the domain error a caller can act on.
///
/// Two registrations racing past the email lookup both reach the insert;
/// the `UNIQUE` constraint decides, and the loser sees the same error as a
/// plain duplicate.
pub(crate) fn user_insert_error(err: sqlx::Error) -> TyreHubError {
    let err = StorageError::from(err);
    if err.is_unique_violation() {
        ValidationError::UserAlreadyExists.into()
    } else {
        err.into()
    }
}
