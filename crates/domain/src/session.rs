//! Login sessions and the identity they resolve to.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::id::UserId;
use crate::time::{Timestamp, hours_after};
use crate::user::{Role, User};

/// A server-side session keyed by an opaque bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Session {
    /// Open a session for `user_id` that lives for `ttl_hours`.
    #[must_use]
    pub fn start(token: String, user_id: UserId, ttl_hours: u32, now: Timestamp) -> Self {
        Self {
            token,
            user_id,
            created_at: now,
            expires_at: hours_after(now, ttl_hours),
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}

/// Who is calling: the result of a successful session lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl SessionUser {
    /// Reject the caller unless their role is `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::WrongRole`] on mismatch.
    pub fn require_role(&self, expected: Role) -> Result<(), AuthError> {
        if self.role == expected {
            Ok(())
        } else {
            Err(AuthError::WrongRole {
                expected,
                actual: self.role,
            })
        }
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
