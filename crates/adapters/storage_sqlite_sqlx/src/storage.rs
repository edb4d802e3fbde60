//! [`SqliteStorage`]: every repository over one shared pool.

use sqlx::SqlitePool;

use tyrehub_app::ports::Storage;

use crate::booking_repo::SqliteServiceBookingRepository;
use crate::catalog_repo::{SqliteBrandRepository, SqliteTyreRepository};
use crate::customer_repo::SqliteCustomerRepository;
use crate::dealer_repo::SqliteDealerRepository;
use crate::order_repo::SqliteOrderRepository;
use crate::review_repo::SqliteReviewRepository;
use crate::session_repo::SqliteSessionRepository;
use crate::user_repo::SqliteUserRepository;

/// The [`Storage`] bundle backed by `SQLite`.
pub struct SqliteStorage {
    users: SqliteUserRepository,
    customers: SqliteCustomerRepository,
    dealers: SqliteDealerRepository,
    brands: SqliteBrandRepository,
    tyres: SqliteTyreRepository,
    orders: SqliteOrderRepository,
    reviews: SqliteReviewRepository,
    bookings: SqliteServiceBookingRepository,
    sessions: SqliteSessionRepository,
}

impl SqliteStorage {
    /// Build every repository over clones of `pool`.
    #[must_use]
    pub fn new(pool: &SqlitePool) -> Self {
        Self {
            users: SqliteUserRepository::new(pool.clone()),
            customers: SqliteCustomerRepository::new(pool.clone()),
            dealers: SqliteDealerRepository::new(pool.clone()),
            brands: SqliteBrandRepository::new(pool.clone()),
            tyres: SqliteTyreRepository::new(pool.clone()),
            orders: SqliteOrderRepository::new(pool.clone()),
            reviews: SqliteReviewRepository::new(pool.clone()),
            bookings: SqliteServiceBookingRepository::new(pool.clone()),
            sessions: SqliteSessionRepository::new(pool.clone()),
        }
    }
}

impl Storage for SqliteStorage {
    type Users = SqliteUserRepository;
    type Customers = SqliteCustomerRepository;
    type Dealers = SqliteDealerRepository;
    type Brands = SqliteBrandRepository;
    type Tyres = SqliteTyreRepository;
    type Orders = SqliteOrderRepository;
    type Reviews = SqliteReviewRepository;
    type Bookings = SqliteServiceBookingRepository;
    type Sessions = SqliteSessionRepository;

    fn users(&self) -> &Self::Users {
        &self.users
    }

    fn customers(&self) -> &Self::Customers {
        &self.customers
    }

    fn dealers(&self) -> &Self::Dealers {
        &self.dealers
    }

    fn brands(&self) -> &Self::Brands {
        &self.brands
    }

    fn tyres(&self) -> &Self::Tyres {
        &self.tyres
    }

    fn orders(&self) -> &Self::Orders {
        &self.orders
    }

    fn reviews(&self) -> &Self::Reviews {
        &self.reviews
    }

    fn bookings(&self) -> &Self::Bookings {
        &self.bookings
    }

    fn sessions(&self) -> &Self::Sessions {
        &self.sessions
    }
}
