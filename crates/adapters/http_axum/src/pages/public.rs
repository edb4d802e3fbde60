//! Pages anyone may open.

use askama::Template;
use axum::response::{IntoResponse, Response};

use super::{dashboard_path, render};
use crate::session::MaybeUser;

/// Landing page.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    user_name: Option<String>,
    dashboard_path: Option<&'static str>,
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    user_name: Option<String>,
}

impl IntoResponse for LoginTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    user_name: Option<String>,
}

impl IntoResponse for RegisterTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// `GET /`
pub async fn home(MaybeUser(user): MaybeUser) -> HomeTemplate {
    HomeTemplate {
        dashboard_path: user.as_ref().map(dashboard_path),
        user_name: user.map(|u| u.name),
    }
}

/// `GET /login`
pub async fn login(MaybeUser(user): MaybeUser) -> LoginTemplate {
    LoginTemplate {
        user_name: user.map(|u| u.name),
    }
}

/// `GET /register`
pub async fn register(MaybeUser(user): MaybeUser) -> RegisterTemplate {
    RegisterTemplate {
        user_name: user.map(|u| u.name),
    }
}
