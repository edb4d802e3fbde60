//! Application services: use-case implementations.
//!
//! Each service is generic over the [`Storage`](crate::ports::Storage)
//! bundle (plus any other port it needs), keeping this layer decoupled from
//! concrete adapters. Services that serve a dashboard check the caller's
//! role before touching the store.

pub mod admin_service;
pub mod auth_service;
pub mod booking_service;
pub mod catalog_service;
pub mod customer_service;
pub mod dealer_service;
