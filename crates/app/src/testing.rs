//! In-memory port implementations shared by the service tests.

use std::future::Future;
use std::sync::Mutex;
use std::thread::ThreadId;
use std::sync::atomic::{AtomicBool, Ordering};

use tyrehub_domain::booking::{BookingStatus, ServiceBooking};
use tyrehub_domain::catalog::{Brand, Tyre};
use tyrehub_domain::customer::Customer;
use tyrehub_domain::dealer::Dealer;
use tyrehub_domain::email::Email;
use tyrehub_domain::error::{TyreHubError, ValidationError};
use tyrehub_domain::id::{BrandId, DealerId, ServiceBookingId, TyreId, UserId};
use tyrehub_domain::order::{Order, OrderStatus};
use tyrehub_domain::review::Review;
use tyrehub_domain::session::Session;
use tyrehub_domain::time::Timestamp;
use tyrehub_domain::user::{Role, User};

use crate::ports::{
    BrandRepository, CredentialHasher, CustomerRepository, DealerRepository, Notifier,
    OrderRepository, OrderScope, ReviewRepository, ServiceBookingRepository, SessionRepository,
    Storage, TyreRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    customers: Vec<Customer>,
    dealers: Vec<Dealer>,
    brands: Vec<Brand>,
    tyres: Vec<Tyre>,
    orders: Vec<Order>,
    reviews: Vec<Review>,
    bookings: Vec<ServiceBooking>,
    sessions: Vec<Session>,
}

/// Every repository backed by vectors behind one mutex.
#[derive(Default)]
pub(crate) struct InMemoryStorage {
    tables: Mutex<Tables>,
    /// When set, creating a customer or dealer profile fails.
    pub(crate) fail_profiles: AtomicBool,
}

impl InMemoryStorage {
    fn with<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        let mut tables = self.tables.lock().unwrap();
        f(&mut tables)
    }

    fn profile_failure(&self) -> Option<TyreHubError> {
        self.fail_profiles
            .load(Ordering::SeqCst)
            .then(|| TyreHubError::Storage("profile table unavailable".into()))
    }

    pub(crate) fn user_count(&self) -> usize {
        self.with(|t| t.users.len())
    }

    pub(crate) fn customer_count(&self) -> usize {
        self.with(|t| t.customers.len())
    }

    pub(crate) fn dealer_count(&self) -> usize {
        self.with(|t| t.dealers.len())
    }

    pub(crate) fn session_count(&self) -> usize {
        self.with(|t| t.sessions.len())
    }

    // Seeding and inspection helpers. The repository traits share method
    // names, so tests go through these instead of the trait methods.

    pub(crate) fn stored_user(&self, id: UserId) -> Option<User> {
        self.with(|t| t.users.iter().find(|u| u.id == id).cloned())
    }

    pub(crate) fn stored_dealer(&self, id: DealerId) -> Option<Dealer> {
        self.with(|t| t.dealers.iter().find(|d| d.id == id).cloned())
    }

    pub(crate) fn stored_booking(&self, id: ServiceBookingId) -> Option<ServiceBooking> {
        self.with(|t| t.bookings.iter().find(|b| b.id == id).cloned())
    }

    pub(crate) fn insert_user(&self, user: User) -> User {
        self.with(|t| t.users.push(user.clone()));
        user
    }

    pub(crate) fn insert_customer(&self, customer: Customer) -> Customer {
        self.with(|t| t.customers.push(customer.clone()));
        customer
    }

    pub(crate) fn insert_dealer(&self, dealer: Dealer) -> Dealer {
        self.with(|t| t.dealers.push(dealer.clone()));
        dealer
    }

    pub(crate) fn insert_brand(&self, brand: Brand) -> Brand {
        self.with(|t| t.brands.push(brand.clone()));
        brand
    }

    pub(crate) fn insert_tyre(&self, tyre: Tyre) -> Tyre {
        self.with(|t| t.tyres.push(tyre.clone()));
        tyre
    }

    pub(crate) fn insert_order(&self, order: Order) -> Order {
        self.with(|t| t.orders.push(order.clone()));
        order
    }

    pub(crate) fn insert_review(&self, review: Review) -> Review {
        self.with(|t| t.reviews.push(review.clone()));
        review
    }

    pub(crate) fn insert_booking(&self, booking: ServiceBooking) -> ServiceBooking {
        self.with(|t| t.bookings.push(booking.clone()));
        booking
    }

    pub(crate) fn insert_session(&self, session: Session) -> Session {
        self.with(|t| t.sessions.push(session.clone()));
        session
    }
}

/// A stored user with the given role and a [`PlainHasher`] password.
pub(crate) fn user_with_role(storage: &InMemoryStorage, email: &str, role: Role) -> User {
    storage.insert_user(
        User::builder()
            .name("Test User")
            .email(email)
            .role(role)
            .password_hash("plain:password")
            .build()
            .unwrap(),
    )
}

fn in_scope(order: &Order, scope: OrderScope) -> bool {
    match scope {
        OrderScope::All => true,
        OrderScope::Buyer(user_id) => order.user_id == user_id,
        OrderScope::Seller(dealer_id) => order.dealer_id == Some(dealer_id),
    }
}

fn len(n: usize) -> i64 {
    i64::try_from(n).unwrap()
}

impl UserRepository for InMemoryStorage {
    fn create(&self, user: User) -> impl Future<Output = Result<User, TyreHubError>> + Send {
        let result = self.with(|t| {
            if t.users.iter().any(|u| u.email == user.email) {
                return Err(ValidationError::UserAlreadyExists.into());
            }
            t.users.push(user.clone());
            Ok(user)
        });
        async move { result }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, TyreHubError>> + Send {
        let found = self.with(|t| t.users.iter().find(|u| u.id == id).cloned());
        async move { Ok(found) }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, TyreHubError>> + Send {
        let found = self.with(|t| t.users.iter().find(|u| u.email == email).cloned());
        async move { Ok(found) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, TyreHubError>> + Send {
        let all = self.with(|t| t.users.clone());
        async move { Ok(all) }
    }

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| len(t.users.len()));
        async move { Ok(n) }
    }

    fn count_by_role(&self, role: Role) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| len(t.users.iter().filter(|u| u.role == role).count()));
        async move { Ok(n) }
    }
}

impl CustomerRepository for InMemoryStorage {
    fn create(
        &self,
        customer: Customer,
    ) -> impl Future<Output = Result<Customer, TyreHubError>> + Send {
        let result = match self.profile_failure() {
            Some(err) => Err(err),
            None => {
                self.with(|t| t.customers.push(customer.clone()));
                Ok(customer)
            }
        };
        async move { result }
    }

    fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Customer>, TyreHubError>> + Send {
        let found = self.with(|t| t.customers.iter().find(|c| c.user_id == user_id).cloned());
        async move { Ok(found) }
    }

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| len(t.customers.len()));
        async move { Ok(n) }
    }
}

impl DealerRepository for InMemoryStorage {
    fn create(&self, dealer: Dealer) -> impl Future<Output = Result<Dealer, TyreHubError>> + Send {
        let result = match self.profile_failure() {
            Some(err) => Err(err),
            None => {
                self.with(|t| t.dealers.push(dealer.clone()));
                Ok(dealer)
            }
        };
        async move { result }
    }

    fn get_by_id(
        &self,
        id: DealerId,
    ) -> impl Future<Output = Result<Option<Dealer>, TyreHubError>> + Send {
        let found = self.with(|t| t.dealers.iter().find(|d| d.id == id).cloned());
        async move { Ok(found) }
    }

    fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Dealer>, TyreHubError>> + Send {
        let found = self.with(|t| t.dealers.iter().find(|d| d.user_id == user_id).cloned());
        async move { Ok(found) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Dealer>, TyreHubError>> + Send {
        let all = self.with(|t| t.dealers.clone());
        async move { Ok(all) }
    }

    fn update(&self, dealer: Dealer) -> impl Future<Output = Result<Dealer, TyreHubError>> + Send {
        self.with(|t| {
            if let Some(slot) = t.dealers.iter_mut().find(|d| d.id == dealer.id) {
                *slot = dealer.clone();
            }
        });
        async move { Ok(dealer) }
    }

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| len(t.dealers.len()));
        async move { Ok(n) }
    }
}

impl BrandRepository for InMemoryStorage {
    fn create(&self, brand: Brand) -> impl Future<Output = Result<Brand, TyreHubError>> + Send {
        self.with(|t| t.brands.push(brand.clone()));
        async move { Ok(brand) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Brand>, TyreHubError>> + Send {
        let mut all = self.with(|t| t.brands.clone());
        all.sort_by(|a, b| a.name.cmp(&b.name));
        async move { Ok(all) }
    }

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| len(t.brands.len()));
        async move { Ok(n) }
    }
}

impl TyreRepository for InMemoryStorage {
    fn create(&self, tyre: Tyre) -> impl Future<Output = Result<Tyre, TyreHubError>> + Send {
        self.with(|t| t.tyres.push(tyre.clone()));
        async move { Ok(tyre) }
    }

    fn get_by_id(
        &self,
        id: TyreId,
    ) -> impl Future<Output = Result<Option<Tyre>, TyreHubError>> + Send {
        let found = self.with(|t| t.tyres.iter().find(|ty| ty.id == id).cloned());
        async move { Ok(found) }
    }

    fn list(
        &self,
        brand_id: Option<BrandId>,
    ) -> impl Future<Output = Result<Vec<Tyre>, TyreHubError>> + Send {
        let mut tyres: Vec<Tyre> = self.with(|t| {
            t.tyres
                .iter()
                .filter(|ty| brand_id.is_none_or(|b| ty.brand_id == b))
                .cloned()
                .collect()
        });
        tyres.sort_by(|a, b| a.name.cmp(&b.name));
        async move { Ok(tyres) }
    }

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| len(t.tyres.len()));
        async move { Ok(n) }
    }
}

impl OrderRepository for InMemoryStorage {
    fn create(&self, order: Order) -> impl Future<Output = Result<Order, TyreHubError>> + Send {
        self.with(|t| t.orders.push(order.clone()));
        async move { Ok(order) }
    }

    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Order>, TyreHubError>> + Send {
        let mut orders = self.with(|t| t.orders.clone());
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders.truncate(limit);
        async move { Ok(orders) }
    }

    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Order>, TyreHubError>> + Send {
        let orders: Vec<Order> = self.with(|t| {
            t.orders
                .iter()
                .filter(|o| in_scope(o, OrderScope::Buyer(user_id)))
                .cloned()
                .collect()
        });
        async move { Ok(orders) }
    }

    fn find_by_dealer(
        &self,
        dealer_id: DealerId,
    ) -> impl Future<Output = Result<Vec<Order>, TyreHubError>> + Send {
        let orders: Vec<Order> = self.with(|t| {
            t.orders
                .iter()
                .filter(|o| in_scope(o, OrderScope::Seller(dealer_id)))
                .cloned()
                .collect()
        });
        async move { Ok(orders) }
    }

    fn count(
        &self,
        scope: OrderScope,
        status: Option<OrderStatus>,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| {
            len(t
                .orders
                .iter()
                .filter(|o| in_scope(o, scope) && status.is_none_or(|s| o.status == s))
                .count())
        });
        async move { Ok(n) }
    }

    fn total_amount(
        &self,
        scope: OrderScope,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let sum = self.with(|t| {
            t.orders
                .iter()
                .filter(|o| in_scope(o, scope) && o.is_billable())
                .map(|o| o.total_cents)
                .sum()
        });
        async move { Ok(sum) }
    }

    fn count_distinct_customers(
        &self,
        dealer_id: DealerId,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| {
            let mut buyers: Vec<UserId> = t
                .orders
                .iter()
                .filter(|o| o.dealer_id == Some(dealer_id))
                .map(|o| o.user_id)
                .collect();
            buyers.sort_by_key(|id| id.as_uuid());
            buyers.dedup();
            len(buyers.len())
        });
        async move { Ok(n) }
    }
}

impl ReviewRepository for InMemoryStorage {
    fn create(&self, review: Review) -> impl Future<Output = Result<Review, TyreHubError>> + Send {
        self.with(|t| t.reviews.push(review.clone()));
        async move { Ok(review) }
    }

    fn find_by_tyre(
        &self,
        tyre_id: TyreId,
    ) -> impl Future<Output = Result<Vec<Review>, TyreHubError>> + Send {
        let reviews: Vec<Review> = self.with(|t| {
            t.reviews
                .iter()
                .filter(|r| r.tyre_id == tyre_id)
                .cloned()
                .collect()
        });
        async move { Ok(reviews) }
    }

    fn count(&self) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| len(t.reviews.len()));
        async move { Ok(n) }
    }

    fn count_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| len(t.reviews.iter().filter(|r| r.user_id == user_id).count()));
        async move { Ok(n) }
    }
}

impl ServiceBookingRepository for InMemoryStorage {
    fn create(
        &self,
        booking: ServiceBooking,
    ) -> impl Future<Output = Result<ServiceBooking, TyreHubError>> + Send {
        self.with(|t| t.bookings.push(booking.clone()));
        async move { Ok(booking) }
    }

    fn get_by_id(
        &self,
        id: ServiceBookingId,
    ) -> impl Future<Output = Result<Option<ServiceBooking>, TyreHubError>> + Send {
        let found = self.with(|t| t.bookings.iter().find(|b| b.id == id).cloned());
        async move { Ok(found) }
    }

    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<ServiceBooking>, TyreHubError>> + Send {
        let mut bookings: Vec<ServiceBooking> = self.with(|t| {
            t.bookings
                .iter()
                .filter(|b| b.user_id == user_id)
                .cloned()
                .collect()
        });
        bookings.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        async move { Ok(bookings) }
    }

    fn update(
        &self,
        booking: ServiceBooking,
    ) -> impl Future<Output = Result<ServiceBooking, TyreHubError>> + Send {
        self.with(|t| {
            if let Some(slot) = t.bookings.iter_mut().find(|b| b.id == booking.id) {
                *slot = booking.clone();
            }
        });
        async move { Ok(booking) }
    }

    fn count_by_status(
        &self,
        status: BookingStatus,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| len(t.bookings.iter().filter(|b| b.status == status).count()));
        async move { Ok(n) }
    }

    fn count_upcoming_for_user(
        &self,
        user_id: UserId,
        now: Timestamp,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let n = self.with(|t| {
            len(t
                .bookings
                .iter()
                .filter(|b| {
                    b.user_id == user_id
                        && b.scheduled_at >= now
                        && matches!(b.status, BookingStatus::Pending | BookingStatus::Confirmed)
                })
                .count())
        });
        async move { Ok(n) }
    }
}

impl SessionRepository for InMemoryStorage {
    fn create(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<Session, TyreHubError>> + Send {
        self.with(|t| t.sessions.push(session.clone()));
        async move { Ok(session) }
    }

    fn get(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Session>, TyreHubError>> + Send {
        let found = self.with(|t| t.sessions.iter().find(|s| s.token == token).cloned());
        async move { Ok(found) }
    }

    fn delete(&self, token: &str) -> impl Future<Output = Result<(), TyreHubError>> + Send {
        self.with(|t| t.sessions.retain(|s| s.token != token));
        async move { Ok(()) }
    }
}

impl Storage for InMemoryStorage {
    type Users = Self;
    type Customers = Self;
    type Dealers = Self;
    type Brands = Self;
    type Tyres = Self;
    type Orders = Self;
    type Reviews = Self;
    type Bookings = Self;
    type Sessions = Self;

    fn users(&self) -> &Self {
        self
    }
    fn customers(&self) -> &Self {
        self
    }
    fn dealers(&self) -> &Self {
        self
    }
    fn brands(&self) -> &Self {
        self
    }
    fn tyres(&self) -> &Self {
        self
    }
    fn orders(&self) -> &Self {
        self
    }
    fn reviews(&self) -> &Self {
        self
    }
    fn bookings(&self) -> &Self {
        self
    }
    fn sessions(&self) -> &Self {
        self
    }
}

/// Reversible "hash" so tests avoid argon2's cost. Remembers the threads it
/// ran on.
#[derive(Default)]
pub(crate) struct PlainHasher {
    threads: Mutex<Vec<ThreadId>>,
}

impl PlainHasher {
    pub(crate) fn threads(&self) -> Vec<ThreadId> {
        self.threads.lock().unwrap().clone()
    }

    fn record_thread(&self) {
        self.threads.lock().unwrap().push(std::thread::current().id());
    }
}

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, TyreHubError> {
        self.record_thread();
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, TyreHubError> {
        self.record_thread();
        Ok(hash.strip_prefix("plain:") == Some(password))
    }
}

/// Notifier that keeps every email it was asked to send.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    sent: Mutex<Vec<Email>>,
    pub(crate) fail: AtomicBool,
}

impl RecordingNotifier {
    pub(crate) fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, email: Email) -> impl Future<Output = Result<(), TyreHubError>> + Send {
        let result = if self.fail.load(Ordering::SeqCst) {
            Err(TyreHubError::Storage("smtp relay down".into()))
        } else {
            self.sent.lock().unwrap().push(email);
            Ok(())
        };
        async move { result }
    }
}
