//! Notifier port: outbound email delivery.

use std::future::Future;

use tyrehub_domain::email::Email;
use tyrehub_domain::error::TyreHubError;

/// Delivers emails to their recipient.
pub trait Notifier {
    /// Hand an email over for delivery.
    fn send(&self, email: Email) -> impl Future<Output = Result<(), TyreHubError>> + Send;
}

impl<T: Notifier + Send + Sync> Notifier for std::sync::Arc<T> {
    fn send(&self, email: Email) -> impl Future<Output = Result<(), TyreHubError>> + Send {
        (**self).send(email)
    }
}
