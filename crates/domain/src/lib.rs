//! # tyrehub-domain
//!
//! Pure domain model for the tyrehub storefront.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **accounts**: users, their role, and the customer or dealer
//!   profile attached to them
//! - Define the **catalog** (brands and tyres) and **reviews**
//! - Define **orders** and their line items
//! - Define **service bookings** and the rule that only pending bookings
//!   can be cancelled
//! - Define **sessions** and the identity a session lookup yields
//! - Define the flat **stats** records returned by dashboards
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod account;
pub mod booking;
pub mod catalog;
pub mod customer;
pub mod dealer;
pub mod email;
pub mod order;
pub mod review;
pub mod session;
pub mod stats;
pub mod user;
