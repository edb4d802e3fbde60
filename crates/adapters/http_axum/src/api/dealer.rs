//! JSON handlers for the dealer dashboard.

use axum::Json;
use axum::extract::State;

use tyrehub_app::ports::{CredentialHasher, Notifier, Storage};
use tyrehub_domain::account::DealerAccount;
use tyrehub_domain::order::Order;
use tyrehub_domain::stats::DealerStats;

use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

/// `GET /api/dealer/stats`
pub async fn stats<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<DealerStats>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Ok(Json(state.dealer_service.stats(&caller).await?))
}

/// `GET /api/dealer/orders`
pub async fn orders<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<Order>>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Ok(Json(state.dealer_service.orders(&caller).await?))
}

/// `GET /api/dealer/profile`
pub async fn profile<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<DealerAccount>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Ok(Json(state.dealer_service.profile(&caller).await?))
}
