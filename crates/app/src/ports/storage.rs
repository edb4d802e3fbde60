//! Storage port: repository traits for persistence.
//!
//! Each repository covers one record type. [`Storage`] bundles them so that
//! services and the HTTP state can be generic over a single parameter.

use std::future::Future;

use tyrehub_domain::booking::{BookingStatus, ServiceBooking};
use tyrehub_domain::catalog::{Brand, Tyre};
use tyrehub_domain::customer::Customer;
use tyrehub_domain::dealer::Dealer;
use tyrehub_domain::error::TyreHubError;
use tyrehub_domain::id::{BrandId, DealerId, ServiceBookingId, TyreId, UserId};
use tyrehub_domain::order::{Order, OrderStatus};
use tyrehub_domain::review::Review;
use tyrehub_domain::session::Session;
use tyrehub_domain::time::Timestamp;
use tyrehub_domain::user::{Role, User};

/// Which orders an order query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    /// Every order in the store.
    All,
    /// Orders placed by one user.
    Buyer(UserId),
    /// Orders fulfilled by one dealer.
    Seller(DealerId),
}

/// Persistence for [`User`] accounts.
pub trait UserRepository {
    /// Insert a new user. The store rejects a duplicate email.
    fn create(&self, user: User) -> impl Future<Output = Result<User, TyreHubError>> + Send;

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, TyreHubError>> + Send;

    /// Look a user up by normalized email.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, TyreHubError>> + Send;

    /// All users, newest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, TyreHubError>> + Send;

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send;

    fn count_by_role(&self, role: Role) -> impl Future<Output = Result<i64, TyreHubError>> + Send;
}

/// Persistence for [`Customer`] profiles.
pub trait CustomerRepository {
    fn create(
        &self,
        customer: Customer,
    ) -> impl Future<Output = Result<Customer, TyreHubError>> + Send;

    fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Customer>, TyreHubError>> + Send;

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send;
}

/// Persistence for [`Dealer`] profiles.
pub trait DealerRepository {
    fn create(&self, dealer: Dealer) -> impl Future<Output = Result<Dealer, TyreHubError>> + Send;

    fn get_by_id(
        &self,
        id: DealerId,
    ) -> impl Future<Output = Result<Option<Dealer>, TyreHubError>> + Send;

    fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Dealer>, TyreHubError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Dealer>, TyreHubError>> + Send;

    fn update(&self, dealer: Dealer) -> impl Future<Output = Result<Dealer, TyreHubError>> + Send;

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send;
}

/// Persistence for [`Brand`] records.
pub trait BrandRepository {
    fn create(&self, brand: Brand) -> impl Future<Output = Result<Brand, TyreHubError>> + Send;

    /// All brands ordered by name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Brand>, TyreHubError>> + Send;

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send;
}

/// Persistence for [`Tyre`] records.
pub trait TyreRepository {
    fn create(&self, tyre: Tyre) -> impl Future<Output = Result<Tyre, TyreHubError>> + Send;

    fn get_by_id(
        &self,
        id: TyreId,
    ) -> impl Future<Output = Result<Option<Tyre>, TyreHubError>> + Send;

    /// Tyres ordered by name, optionally restricted to one brand.
    fn list(
        &self,
        brand_id: Option<BrandId>,
    ) -> impl Future<Output = Result<Vec<Tyre>, TyreHubError>> + Send;

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send;
}

/// Persistence for [`Order`] records and their items.
pub trait OrderRepository {
    /// Insert an order together with its items.
    fn create(&self, order: Order) -> impl Future<Output = Result<Order, TyreHubError>> + Send;

    /// Most recent orders first, at most `limit`.
    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Order>, TyreHubError>> + Send;

    /// Orders placed by `user_id`, newest first.
    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Order>, TyreHubError>> + Send;

    /// Orders fulfilled by `dealer_id`, newest first.
    fn find_by_dealer(
        &self,
        dealer_id: DealerId,
    ) -> impl Future<Output = Result<Vec<Order>, TyreHubError>> + Send;

    /// Number of orders in `scope`, optionally restricted to one status.
    fn count(
        &self,
        scope: OrderScope,
        status: Option<OrderStatus>,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send;

    /// Sum of `total_cents` over non-cancelled orders in `scope`.
    fn total_amount(
        &self,
        scope: OrderScope,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send;

    /// Number of distinct buyers among the dealer's orders.
    fn count_distinct_customers(
        &self,
        dealer_id: DealerId,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send;
}

/// Persistence for [`Review`] records.
pub trait ReviewRepository {
    fn create(&self, review: Review) -> impl Future<Output = Result<Review, TyreHubError>> + Send;

    /// Reviews of one tyre, newest first.
    fn find_by_tyre(
        &self,
        tyre_id: TyreId,
    ) -> impl Future<Output = Result<Vec<Review>, TyreHubError>> + Send;

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send;

    fn count_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send;
}

/// Persistence for [`ServiceBooking`] records.
pub trait ServiceBookingRepository {
    fn create(
        &self,
        booking: ServiceBooking,
    ) -> impl Future<Output = Result<ServiceBooking, TyreHubError>> + Send;

    fn get_by_id(
        &self,
        id: ServiceBookingId,
    ) -> impl Future<Output = Result<Option<ServiceBooking>, TyreHubError>> + Send;

    /// Bookings of one user, latest `scheduled_at` first.
    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<ServiceBooking>, TyreHubError>> + Send;

    /// Overwrite status, notes and `updated_at` of an existing booking.
    fn update(
        &self,
        booking: ServiceBooking,
    ) -> impl Future<Output = Result<ServiceBooking, TyreHubError>> + Send;

    fn count_by_status(
        &self,
        status: BookingStatus,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send;

    /// Pending or confirmed bookings of `user_id` scheduled at or after `now`.
    fn count_upcoming_for_user(
        &self,
        user_id: UserId,
        now: Timestamp,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send;
}

/// Persistence for login [`Session`]s.
pub trait SessionRepository {
    fn create(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<Session, TyreHubError>> + Send;

    fn get(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Session>, TyreHubError>> + Send;

    /// Remove a session. Removing an unknown token is not an error.
    fn delete(&self, token: &str) -> impl Future<Output = Result<(), TyreHubError>> + Send;
}

/// Every repository the application needs, behind one type parameter.
pub trait Storage: Send + Sync + 'static {
    type Users: UserRepository + Send + Sync;
    type Customers: CustomerRepository + Send + Sync;
    type Dealers: DealerRepository + Send + Sync;
    type Brands: BrandRepository + Send + Sync;
    type Tyres: TyreRepository + Send + Sync;
    type Orders: OrderRepository + Send + Sync;
    type Reviews: ReviewRepository + Send + Sync;
    type Bookings: ServiceBookingRepository + Send + Sync;
    type Sessions: SessionRepository + Send + Sync;

    fn users(&self) -> &Self::Users;
    fn customers(&self) -> &Self::Customers;
    fn dealers(&self) -> &Self::Dealers;
    fn brands(&self) -> &Self::Brands;
    fn tyres(&self) -> &Self::Tyres;
    fn orders(&self) -> &Self::Orders;
    fn reviews(&self) -> &Self::Reviews;
    fn bookings(&self) -> &Self::Bookings;
    fn sessions(&self) -> &Self::Sessions;
}
