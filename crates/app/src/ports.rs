//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod credentials;
pub mod notifier;
pub mod storage;

pub use credentials::CredentialHasher;
pub use notifier::Notifier;
pub use storage::{
    BrandRepository, CustomerRepository, DealerRepository, OrderRepository, OrderScope,
    ReviewRepository, ServiceBookingRepository, SessionRepository, Storage, TyreRepository,
    UserRepository,
};
