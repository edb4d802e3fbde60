//! Shared application state for axum handlers.

use std::sync::Arc;

use tyrehub_app::ports::{CredentialHasher, Notifier, Storage};
use tyrehub_app::services::admin_service::AdminService;
use tyrehub_app::services::auth_service::AuthService;
use tyrehub_app::services::booking_service::BookingService;
use tyrehub_app::services::catalog_service::CatalogService;
use tyrehub_app::services::customer_service::CustomerService;
use tyrehub_app::services::dealer_service::DealerService;

/// Application state shared across all axum handlers.
///
/// Generic over the storage bundle, the credential hasher and the notifier
/// to avoid dynamic dispatch. `Clone` is implemented manually so the
/// underlying types themselves do not need to be `Clone`; only the `Arc`
/// wrappers are cloned.
pub struct AppState<S, H, N> {
    /// Registration, login and session lookup.
    pub auth_service: Arc<AuthService<S, H, N>>,
    /// Admin dashboard.
    pub admin_service: Arc<AdminService<S>>,
    /// Customer dashboard.
    pub customer_service: Arc<CustomerService<S>>,
    /// Dealer dashboard.
    pub dealer_service: Arc<DealerService<S>>,
    /// Workshop appointments.
    pub booking_service: Arc<BookingService<S>>,
    /// Public catalog.
    pub catalog_service: Arc<CatalogService<S>>,
    /// Outbound email, used directly by `/api/email/send`.
    pub notifier: Arc<N>,
}

impl<S, H, N> Clone for AppState<S, H, N> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            admin_service: Arc::clone(&self.admin_service),
            customer_service: Arc::clone(&self.customer_service),
            dealer_service: Arc::clone(&self.dealer_service),
            booking_service: Arc::clone(&self.booking_service),
            catalog_service: Arc::clone(&self.catalog_service),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<S, H, N> AppState<S, H, N>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    /// Build every service over one shared storage bundle.
    pub fn new(storage: Arc<S>, hasher: H, notifier: Arc<N>, session_ttl_hours: u32) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&storage),
                Arc::new(hasher),
                Arc::clone(&notifier),
                session_ttl_hours,
            )),
            admin_service: Arc::new(AdminService::new(Arc::clone(&storage))),
            customer_service: Arc::new(CustomerService::new(Arc::clone(&storage))),
            dealer_service: Arc::new(DealerService::new(Arc::clone(&storage))),
            booking_service: Arc::new(BookingService::new(Arc::clone(&storage))),
            catalog_service: Arc::new(CatalogService::new(storage)),
            notifier,
        }
    }
}
