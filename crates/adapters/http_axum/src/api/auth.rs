//! JSON handlers for registration and sessions.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use tyrehub_app::ports::{CredentialHasher, Notifier, Storage};
use tyrehub_app::services::auth_service::RegisterUser;
use tyrehub_domain::account::Registration;
use tyrehub_domain::error::ValidationError;
use tyrehub_domain::session::SessionUser;
use tyrehub_domain::time::Timestamp;
use tyrehub_domain::user::PublicUser;

use crate::error::ApiError;
use crate::session::{CurrentUser, cleared_cookie, session_cookie, session_token};
use crate::state::AppState;

/// Request body for `POST /api/auth/register`.
///
/// Every field is optional so that a missing one is reported by name.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub address: Option<String>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub tax_number: Option<String>,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            phone: req.phone,
            role: req.role,
            address: req.address,
            business_name: req.business_name,
            business_address: req.business_address,
            tax_number: req.tax_number,
        }
    }
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body returned by a successful login.
#[derive(Debug, Serialize)]
pub struct LoginBody {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: PublicUser,
}

/// Body returned by `GET /api/auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionBody {
    pub user: SessionUser,
}

/// Possible responses from the register endpoint.
pub enum RegisterResponse {
    Created(Json<Registration>),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the login endpoint.
pub enum LoginResponse {
    Ok { cookie: String, body: Json<LoginBody> },
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok { cookie, body } => ([(header::SET_COOKIE, cookie)], body).into_response(),
        }
    }
}

/// Possible responses from the logout endpoint.
pub enum LogoutResponse {
    NoContent,
}

impl IntoResponse for LogoutResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => (
                StatusCode::NO_CONTENT,
                [(header::SET_COOKIE, cleared_cookie())],
            )
                .into_response(),
        }
    }
}

/// `POST /api/auth/register`
pub async fn register<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<RegisterResponse, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let registration = state.auth_service.register(req.into()).await?;
    Ok(RegisterResponse::Created(Json(registration)))
}

/// `POST /api/auth/login`
pub async fn login<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<LoginResponse, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let email = req.email.ok_or(ValidationError::MissingField("email"))?;
    let password = req.password.ok_or(ValidationError::MissingField("password"))?;

    let (session, user) = state.auth_service.login(&email, &password).await?;
    let max_age = (session.expires_at - session.created_at).num_seconds();

    Ok(LoginResponse::Ok {
        cookie: session_cookie(&session.token, max_age),
        body: Json(LoginBody {
            token: session.token,
            expires_at: session.expires_at,
            user,
        }),
    })
}

/// `POST /api/auth/logout`: succeeds with or without a session.
pub async fn logout<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    headers: HeaderMap,
) -> Result<LogoutResponse, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    if let Some(token) = session_token(&headers) {
        state.auth_service.logout(&token).await?;
    }
    Ok(LogoutResponse::NoContent)
}

/// `GET /api/auth/session`
pub async fn session(CurrentUser(user): CurrentUser) -> Json<SessionBody> {
    Json(SessionBody { user })
}
