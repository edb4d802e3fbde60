//! User accounts and their role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::UserId;
use crate::time::{Timestamp, now};

/// The kind of account. Drives which dashboard endpoints a session may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Customer,
    Dealer,
}

impl Role {
    /// Wire and storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Customer => "CUSTOMER",
            Self::Dealer => "DEALER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "CUSTOMER" => Ok(Self::Customer),
            "DEALER" => Ok(Self::Dealer),
            _ => Err(ValidationError::UnknownRole(s.to_string())),
        }
    }
}

/// Trim and lower-case an email address, rejecting obviously invalid input.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] for blank input and
/// [`ValidationError::InvalidEmail`] when there is no `@` between two
/// non-empty parts.
pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ValidationError::InvalidEmail),
    }
}

/// A stored account, including its password hash.
///
/// Deliberately not `Serialize`: use [`User::to_public`] for anything that
/// leaves the process.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the name or password hash is empty,
    /// or the email is not normalized.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if normalize_email(&self.email)? != self.email {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password_hash.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }
        Ok(())
    }

    /// The credential-free view of this account.
    #[must_use]
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// What API responses expose about a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: Timestamp,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    role: Option<Role>,
    password_hash: Option<String>,
    created_at: Option<Timestamp>,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Consume the builder, normalize the email, validate, and return a [`User`].
    ///
    /// The role defaults to [`Role::Customer`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a required field is missing or the
    /// email is invalid.
    pub fn build(self) -> Result<User, ValidationError> {
        let email = normalize_email(self.email.as_deref().unwrap_or_default())?;
        let user = User {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default().trim().to_string(),
            email,
            phone: self.phone.filter(|p| !p.trim().is_empty()),
            role: self.role.unwrap_or(Role::Customer),
            password_hash: self.password_hash.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(now),
        };
        user.validate()?;
        Ok(user)
    }
}
