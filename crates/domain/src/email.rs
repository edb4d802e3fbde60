//! Outbound email messages handed to the notifier.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::user::{User, normalize_email};

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Email {
    /// # Errors
    ///
    /// Returns [`ValidationError`] when any part is blank or the recipient
    /// is not an email address.
    pub fn new(to: &str, subject: &str, body: &str) -> Result<Self, ValidationError> {
        let to = normalize_email(to).map_err(|err| match err {
            ValidationError::MissingField(_) => ValidationError::MissingField("to"),
            other => other,
        })?;
        if subject.trim().is_empty() {
            return Err(ValidationError::MissingField("subject"));
        }
        if body.trim().is_empty() {
            return Err(ValidationError::MissingField("body"));
        }
        Ok(Self {
            to,
            subject: subject.trim().to_string(),
            body: body.to_string(),
        })
    }

    /// Greeting sent after a successful registration.
    #[must_use]
    pub fn welcome(user: &User) -> Self {
        Self {
            to: user.email.clone(),
            subject: "Welcome to tyrehub".to_string(),
            body: format!(
                "Hi {},\n\nYour {} account is ready. Happy driving!\n",
                user.name,
                user.role.as_str().to_lowercase()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_email() {
        let email = Email::new(" Bob@Example.com", "Hello", "Body").unwrap();
        assert_eq!(email.to, "bob@example.com");
    }

    #[test]
    fn should_report_missing_recipient_as_to() {
        assert_eq!(
            Email::new("", "Hello", "Body"),
            Err(ValidationError::MissingField("to"))
        );
    }

    #[test]
    fn should_require_subject_and_body() {
        assert_eq!(
            Email::new("a@b.c", " ", "Body"),
            Err(ValidationError::MissingField("subject"))
        );
        assert_eq!(
            Email::new("a@b.c", "Hi", ""),
            Err(ValidationError::MissingField("body"))
        );
    }

    #[test]
    fn should_address_welcome_to_user() {
        let user = User::builder()
            .name("Carla")
            .email("carla@example.com")
            .password_hash("h")
            .build()
            .unwrap();
        let email = Email::welcome(&user);
        assert_eq!(email.to, "carla@example.com");
        assert!(email.body.contains("Carla"));
        assert!(email.body.contains("customer"));
    }
}
