//! # tyrehub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `tyrehub-app::ports::storage`
//! - Bundle them as [`SqliteStorage`] over one connection pool
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `tyrehub-app` (for port traits) and `tyrehub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod codec;
pub mod error;
pub mod pool;

pub mod booking_repo;
pub mod catalog_repo;
pub mod customer_repo;
pub mod dealer_repo;
pub mod order_repo;
pub mod review_repo;
pub mod session_repo;
pub mod storage;
pub mod user_repo;

#[cfg(test)]
mod fixtures;

pub use pool::{Config, Database};
pub use storage::SqliteStorage;
