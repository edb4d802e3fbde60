//! # tyrehub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - one repository per record type, bundled by `Storage`
//!   - `Notifier`: outbound email
//!   - `CredentialHasher`: password hashing
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AuthService`: register, login, logout, session lookup
//!   - `AdminService`, `CustomerService`, `DealerService`: dashboards
//!   - `BookingService`: create, list, cancel bookings
//!   - `CatalogService`: brands, tyres, reviews
//! - Provide in-process implementations that need no IO: the logging
//!   notifier and the argon2 hasher
//!
//! ## Dependency rule
//! Depends on `tyrehub-domain` only (plus hashing and randomness crates).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod credentials;
pub mod notifier;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
