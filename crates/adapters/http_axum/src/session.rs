//! Session extractors.
//!
//! The token travels either as `Authorization: Bearer <token>` or in the
//! [`SESSION_COOKIE`] cookie set at login. The bearer header wins when both
//! are present.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};

use tyrehub_app::ports::{CredentialHasher, Notifier, Storage};
use tyrehub_domain::error::AuthError;
use tyrehub_domain::session::SessionUser;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "tyrehub_session";

/// Pull the session token out of the request headers.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// `Set-Cookie` value for a fresh session.
#[must_use]
pub fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_seconds}")
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
#[must_use]
pub fn cleared_cookie() -> String {
    session_cookie("", 0)
}

async fn resolve<S, H, N>(
    headers: &HeaderMap,
    state: &AppState<S, H, N>,
) -> Result<Option<SessionUser>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let Some(token) = session_token(headers) else {
        return Ok(None);
    };
    Ok(state.auth_service.resolve_session(&token).await?)
}

/// The signed-in caller. Rejects with `401` when there is no live session.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

impl<S, H, N> FromRequestParts<AppState<S, H, N>> for CurrentUser
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, H, N>,
    ) -> Result<Self, Self::Rejection> {
        resolve(&parts.headers, state)
            .await?
            .map(Self)
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }
}

/// The caller if signed in. Used by pages that redirect instead of failing.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionUser>);

impl<S, H, N> FromRequestParts<AppState<S, H, N>> for MaybeUser
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, H, N>,
    ) -> Result<Self, Self::Rejection> {
        resolve(&parts.headers, state).await.map(Self)
    }
}
