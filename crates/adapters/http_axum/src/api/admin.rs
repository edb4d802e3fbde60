//! JSON handlers for the admin dashboard. `AdminService` rejects non-admin callers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use tyrehub_app::ports::{CredentialHasher, Notifier, Storage};
use tyrehub_domain::dealer::Dealer;
use tyrehub_domain::id::DealerId;
use tyrehub_domain::order::Order;
use tyrehub_domain::stats::AdminStats;
use tyrehub_domain::user::PublicUser;

use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

/// Query string for `GET /api/admin/orders`.
#[derive(Debug, Default, Deserialize)]
pub struct RecentOrdersQuery {
    pub limit: Option<usize>,
}

/// `GET /api/admin/stats`
pub async fn stats<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<AdminStats>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Ok(Json(state.admin_service.stats(&caller).await?))
}

/// `GET /api/admin/orders?limit=`
pub async fn orders<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
    query: Result<Query<RecentOrdersQuery>, QueryRejection>,
) -> Result<Json<Vec<Order>>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let Query(query) = query?;
    Ok(Json(state.admin_service.recent_orders(&caller, query.limit).await?))
}

/// `GET /api/admin/users`
pub async fn users<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<PublicUser>>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Ok(Json(state.admin_service.list_users(&caller).await?))
}

/// `GET /api/admin/dealers`
pub async fn dealers<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<Dealer>>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Ok(Json(state.admin_service.list_dealers(&caller).await?))
}

/// `POST /api/admin/dealers/{id}/verify`
pub async fn verify_dealer<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Dealer>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let dealer_id = DealerId::parse_input(&id)?;
    Ok(Json(state.admin_service.verify_dealer(&caller, dealer_id).await?))
}
