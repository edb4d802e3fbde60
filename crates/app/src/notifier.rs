//! Notifier that only logs: stands in for a real email gateway.

use std::future::Future;

use tyrehub_domain::email::Email;
use tyrehub_domain::error::TyreHubError;

use crate::ports::Notifier;

/// [`Notifier`] that records each email as a `tracing` event and reports
/// success. Nothing leaves the process.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for LogNotifier {
    fn send(&self, email: Email) -> impl Future<Output = Result<(), TyreHubError>> + Send {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            body_len = email.body.len(),
            "email accepted (delivery not configured)"
        );
        async { Ok(()) }
    }
}
