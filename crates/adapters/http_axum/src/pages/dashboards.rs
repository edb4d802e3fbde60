//! Pages that need a session.

use askama::Template;

use tyrehub_domain::session::SessionUser;
use tyrehub_domain::user::Role;

use super::{PageResponse, to_login};
use crate::session::MaybeUser;

/// Shared layout of the three role dashboards.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    user_name: Option<String>,
    heading: &'static str,
    api_base: &'static str,
}

#[derive(Template)]
#[template(path = "bookings.html")]
pub struct BookingsTemplate {
    user_name: Option<String>,
}

fn dashboard(
    user: Option<SessionUser>,
    role: Role,
    heading: &'static str,
    api_base: &'static str,
) -> PageResponse<DashboardTemplate> {
    match user {
        Some(user) if user.role == role => PageResponse::Page(DashboardTemplate {
            user_name: Some(user.name),
            heading,
            api_base,
        }),
        _ => to_login(),
    }
}

/// `GET /admin`
pub async fn admin(MaybeUser(user): MaybeUser) -> PageResponse<DashboardTemplate> {
    dashboard(user, Role::Admin, "Administration", "/api/admin")
}

/// `GET /customer`
pub async fn customer(MaybeUser(user): MaybeUser) -> PageResponse<DashboardTemplate> {
    dashboard(user, Role::Customer, "My garage", "/api/customer")
}

/// `GET /dealer`
pub async fn dealer(MaybeUser(user): MaybeUser) -> PageResponse<DashboardTemplate> {
    dashboard(user, Role::Dealer, "Dealer desk", "/api/dealer")
}

fn bookings_page(user: Option<SessionUser>) -> PageResponse<BookingsTemplate> {
    match user {
        Some(user) => PageResponse::Page(BookingsTemplate {
            user_name: Some(user.name),
        }),
        None => to_login(),
    }
}

/// `GET /bookings`
pub async fn bookings(MaybeUser(user): MaybeUser) -> PageResponse<BookingsTemplate> {
    bookings_page(user)
}
