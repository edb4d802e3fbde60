//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod admin;
#[allow(clippy::missing_errors_doc)]
pub mod auth;
#[allow(clippy::missing_errors_doc)]
pub mod bookings;
#[allow(clippy::missing_errors_doc)]
pub mod catalog;
#[allow(clippy::missing_errors_doc)]
pub mod customer;
#[allow(clippy::missing_errors_doc)]
pub mod dealer;
#[allow(clippy::missing_errors_doc)]
pub mod email;

use axum::Router;
use axum::routing::{get, post};

use tyrehub_app::ports::{CredentialHasher, Notifier, Storage};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, H, N>() -> Router<AppState<S, H, N>>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Router::new()
        // Auth
        .route("/auth/register", post(auth::register::<S, H, N>))
        .route("/auth/login", post(auth::login::<S, H, N>))
        .route("/auth/logout", post(auth::logout::<S, H, N>))
        .route("/auth/session", get(auth::session))
        // Admin
        .route("/admin/stats", get(admin::stats::<S, H, N>))
        .route("/admin/orders", get(admin::orders::<S, H, N>))
        .route("/admin/users", get(admin::users::<S, H, N>))
        .route("/admin/dealers", get(admin::dealers::<S, H, N>))
        .route(
            "/admin/dealers/{id}/verify",
            post(admin::verify_dealer::<S, H, N>),
        )
        // Customer
        .route("/customer/stats", get(customer::stats::<S, H, N>))
        .route("/customer/orders", get(customer::orders::<S, H, N>))
        .route("/customer/profile", get(customer::profile::<S, H, N>))
        // Dealer
        .route("/dealer/stats", get(dealer::stats::<S, H, N>))
        .route("/dealer/orders", get(dealer::orders::<S, H, N>))
        .route("/dealer/profile", get(dealer::profile::<S, H, N>))
        // Email
        .route("/email/send", post(email::send::<S, H, N>))
        // Service bookings
        .route(
            "/service-bookings",
            get(bookings::list::<S, H, N>).post(bookings::create::<S, H, N>),
        )
        .route(
            "/service-bookings/{id}/cancel",
            post(bookings::cancel::<S, H, N>),
        )
        // Catalog
        .route("/brands", get(catalog::brands::<S, H, N>))
        .route("/tyres", get(catalog::tyres::<S, H, N>))
        .route("/tyres/{id}", get(catalog::tyre::<S, H, N>))
        .route("/tyres/{id}/reviews", get(catalog::reviews::<S, H, N>))
}
