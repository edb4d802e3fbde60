//! Catalog service: public, read-only access to brands, tyres and reviews.

use std::sync::Arc;

use tyrehub_domain::catalog::{Brand, Tyre};
use tyrehub_domain::error::{NotFoundError, TyreHubError};
use tyrehub_domain::id::{BrandId, TyreId};
use tyrehub_domain::review::Review;

use crate::ports::{BrandRepository, ReviewRepository, Storage, TyreRepository};

pub struct CatalogService<S> {
    storage: Arc<S>,
}

impl<S: Storage> CatalogService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn brands(&self) -> Result<Vec<Brand>, TyreHubError> {
        self.storage.brands().get_all().await
    }

    /// Tyres ordered by name, optionally for a single brand.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn tyres(&self, brand_id: Option<BrandId>) -> Result<Vec<Tyre>, TyreHubError> {
        self.storage.tyres().list(brand_id).await
    }

    /// # Errors
    ///
    /// Returns [`TyreHubError::NotFound`] if the tyre does not exist.
    pub async fn tyre(&self, id: TyreId) -> Result<Tyre, TyreHubError> {
        self.storage
            .tyres()
            .get_by_id(id)
            .await?
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Tyre",
                    id: id.to_string(),
                }
                .into()
            })
    }

    /// Reviews of one tyre, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::NotFound`] if the tyre does not exist.
    pub async fn reviews(&self, tyre_id: TyreId) -> Result<Vec<Review>, TyreHubError> {
        let tyre = self.tyre(tyre_id).await?;
        self.storage.reviews().find_by_tyre(tyre.id).await
    }
}
