//! Server-rendered HTML page shells.
//!
//! Pages carry no data of their own beyond the caller's name: they render
//! a layout and fetch everything else from `/api`. Role pages redirect to
//! `/login` with `303 See Other` when the caller may not see them.

pub mod dashboards;
pub mod public;

use axum::Router;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;

use tyrehub_app::ports::{CredentialHasher, Notifier, Storage};
use tyrehub_domain::session::SessionUser;
use tyrehub_domain::user::Role;

use crate::state::AppState;

/// Build the page sub-router.
pub fn routes<S, H, N>() -> Router<AppState<S, H, N>>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(public::home))
        .route("/login", get(public::login))
        .route("/register", get(public::register))
        .route("/admin", get(dashboards::admin))
        .route("/customer", get(dashboards::customer))
        .route("/dealer", get(dashboards::dealer))
        .route("/bookings", get(dashboards::bookings))
}

/// A rendered page, or a redirect when the caller is not allowed to see it.
pub enum PageResponse<T> {
    Page(T),
    Redirect(Redirect),
}

impl<T: askama::Template> IntoResponse for PageResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Page(template) => render(&template),
            Self::Redirect(redirect) => redirect.into_response(),
        }
    }
}

pub(crate) fn render<T: askama::Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "template rendering failed");
            axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub(crate) fn to_login<T>() -> PageResponse<T> {
    PageResponse::Redirect(Redirect::to("/login"))
}

/// Where a signed-in user lands.
pub(crate) fn dashboard_path(user: &SessionUser) -> &'static str {
    match user.role {
        Role::Admin => "/admin",
        Role::Customer => "/customer",
        Role::Dealer => "/dealer",
    }
}
