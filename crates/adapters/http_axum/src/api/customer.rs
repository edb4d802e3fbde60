//! JSON handlers for the customer dashboard.

use axum::Json;
use axum::extract::State;

use tyrehub_app::ports::{CredentialHasher, Notifier, Storage};
use tyrehub_domain::account::CustomerAccount;
use tyrehub_domain::order::Order;
use tyrehub_domain::stats::CustomerStats;

use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

/// `GET /api/customer/stats`
pub async fn stats<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<CustomerStats>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Ok(Json(state.customer_service.stats(&caller).await?))
}

/// `GET /api/customer/orders`
pub async fn orders<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<Order>>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Ok(Json(state.customer_service.orders(&caller).await?))
}

/// `GET /api/customer/profile`
pub async fn profile<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<CustomerAccount>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Ok(Json(state.customer_service.profile(&caller).await?))
}
