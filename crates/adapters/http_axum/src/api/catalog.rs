//! Public JSON handlers for the tyre catalog.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use tyrehub_app::ports::{CredentialHasher, Notifier, Storage};
use tyrehub_domain::catalog::{Brand, Tyre};
use tyrehub_domain::id::{BrandId, TyreId};
use tyrehub_domain::review::Review;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for `GET /api/tyres`.
#[derive(Debug, Default, Deserialize)]
pub struct TyreQuery {
    pub brand_id: Option<String>,
}

/// `GET /api/brands`
pub async fn brands<S, H, N>(
    State(state): State<AppState<S, H, N>>,
) -> Result<Json<Vec<Brand>>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Ok(Json(state.catalog_service.brands().await?))
}

/// `GET /api/tyres?brand_id=`
pub async fn tyres<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    query: Result<Query<TyreQuery>, QueryRejection>,
) -> Result<Json<Vec<Tyre>>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let Query(query) = query?;
    let brand_id = query
        .brand_id
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(BrandId::parse_input)
        .transpose()?;
    Ok(Json(state.catalog_service.tyres(brand_id).await?))
}

/// `GET /api/tyres/{id}`
pub async fn tyre<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    Path(id): Path<String>,
) -> Result<Json<Tyre>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let tyre_id = TyreId::parse_input(&id)?;
    Ok(Json(state.catalog_service.tyre(tyre_id).await?))
}

/// `GET /api/tyres/{id}/reviews`
pub async fn reviews<S, H, N>(
    State(state): State<AppState<S, H, N>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let tyre_id = TyreId::parse_input(&id)?;
    Ok(Json(state.catalog_service.reviews(tyre_id).await?))
}
