//! # tyrehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** under `/api` (auth, admin, customer, dealer,
//!   email, service bookings, catalog)
//! - Resolve the caller's session from a bearer token or the
//!   `tyrehub_session` cookie
//! - Serve server-rendered **page shells** (`/`, `/login`, `/register`,
//!   `/admin`, `/customer`, `/dealer`, `/bookings`)
//! - Map application results into HTTP responses (JSON or HTML) and
//!   application errors into status codes
//!
//! ## Dependency rule
//! Depends on `tyrehub-app` (for port traits and services) and `tyrehub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod pages;
pub mod router;
pub mod session;
pub mod state;

pub use router::build;
pub use state::AppState;
