//! JSON handler for ad-hoc email.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use tyrehub_app::ports::{CredentialHasher, Notifier, Storage};
use tyrehub_domain::email::Email;

use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

/// Request body for `POST /api/email/send`.
#[derive(Debug, Default, Deserialize)]
pub struct SendEmailRequest {
    pub to: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// Possible responses from the send endpoint.
pub enum SendResponse {
    Accepted,
}

impl IntoResponse for SendResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted => (
                StatusCode::ACCEPTED,
                Json(serde_json::json!({ "sent": true })),
            )
                .into_response(),
        }
    }
}

/// `POST /api/email/send`
pub async fn send<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<SendResponse, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let email = Email::new(
        req.to.as_deref().unwrap_or_default(),
        req.subject.as_deref().unwrap_or_default(),
        req.body.as_deref().unwrap_or_default(),
    )?;
    tracing::info!(sender = %caller.user_id, to = %email.to, "email requested");
    state.notifier.send(email).await?;
    Ok(SendResponse::Accepted)
}
