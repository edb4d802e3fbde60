//! JSON handlers for service bookings. Any signed-in role may use them.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use tyrehub_app::ports::{CredentialHasher, Notifier, Storage};
use tyrehub_app::services::booking_service::NewBooking;
use tyrehub_domain::booking::ServiceBooking;
use tyrehub_domain::id::ServiceBookingId;
use tyrehub_domain::time::Timestamp;

use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

/// Request body for `POST /api/service-bookings`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBookingRequest {
    pub service_type: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub vehicle: Option<String>,
    pub notes: Option<String>,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(req: CreateBookingRequest) -> Self {
        Self {
            service_type: req.service_type,
            scheduled_at: req.scheduled_at,
            vehicle: req.vehicle,
            notes: req.notes,
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<ServiceBooking>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/service-bookings`
pub async fn list<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<ServiceBooking>>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Ok(Json(state.booking_service.list_for_user(&caller).await?))
}

/// `POST /api/service-bookings`
pub async fn create<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let booking = state.booking_service.create(&caller, req.into()).await?;
    Ok(CreateResponse::Created(Json(booking)))
}

/// `POST /api/service-bookings/{id}/cancel`
pub async fn cancel<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ServiceBooking>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let booking_id = ServiceBookingId::parse_input(&id)?;
    Ok(Json(state.booking_service.cancel(&caller, booking_id).await?))
}
