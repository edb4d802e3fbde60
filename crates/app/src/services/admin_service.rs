//! Admin service: store-wide statistics and account oversight.

use std::sync::Arc;

use tyrehub_domain::booking::BookingStatus;
use tyrehub_domain::dealer::Dealer;
use tyrehub_domain::error::{NotFoundError, TyreHubError};
use tyrehub_domain::id::DealerId;
use tyrehub_domain::order::{Order, OrderStatus};
use tyrehub_domain::session::SessionUser;
use tyrehub_domain::stats::AdminStats;
use tyrehub_domain::user::{PublicUser, Role};

use crate::ports::{
    BrandRepository, DealerRepository, OrderRepository, OrderScope, ReviewRepository,
    ServiceBookingRepository, Storage, TyreRepository, UserRepository,
};

/// Number of orders returned when the caller gives no limit.
pub const DEFAULT_RECENT_ORDERS: usize = 10;
/// Upper bound on the recent orders page.
pub const MAX_RECENT_ORDERS: usize = 100;

/// Application service behind the admin dashboard. Every method rejects
/// callers that are not administrators.
pub struct AdminService<S> {
    storage: Arc<S>,
}

impl<S: Storage> AdminService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Aggregate counters over the whole store.
    ///
    /// The independent counts run concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Unauthorized`] unless the caller is an
    /// admin, or a storage error if any count fails.
    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id))]
    pub async fn stats(&self, caller: &SessionUser) -> Result<AdminStats, TyreHubError> {
        caller.require_role(Role::Admin)?;
        let s = &*self.storage;
        let (
            total_users,
            total_customers,
            total_dealers,
            total_orders,
            pending_orders,
            total_revenue_cents,
            total_tyres,
            total_brands,
            total_reviews,
            pending_bookings,
        ) = tokio::try_join!(
            s.users().count(),
            s.users().count_by_role(Role::Customer),
            s.users().count_by_role(Role::Dealer),
            s.orders().count(OrderScope::All, None),
            s.orders().count(OrderScope::All, Some(OrderStatus::Pending)),
            s.orders().total_amount(OrderScope::All),
            s.tyres().count(),
            s.brands().count(),
            s.reviews().count(),
            s.bookings().count_by_status(BookingStatus::Pending),
        )?;

        Ok(AdminStats {
            total_users,
            total_customers,
            total_dealers,
            total_orders,
            pending_orders,
            total_revenue_cents,
            total_tyres,
            total_brands,
            total_reviews,
            pending_bookings,
        })
    }

    /// Most recent orders, newest first.
    ///
    /// `limit` defaults to [`DEFAULT_RECENT_ORDERS`] and is clamped to
    /// `1..=MAX_RECENT_ORDERS`.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Unauthorized`] for non-admin callers, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, caller))]
    pub async fn recent_orders(
        &self,
        caller: &SessionUser,
        limit: Option<usize>,
    ) -> Result<Vec<Order>, TyreHubError> {
        caller.require_role(Role::Admin)?;
        let limit = limit
            .unwrap_or(DEFAULT_RECENT_ORDERS)
            .clamp(1, MAX_RECENT_ORDERS);
        self.storage.orders().get_recent(limit).await
    }

    /// Every account, without credentials.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Unauthorized`] for non-admin callers, or a
    /// storage error propagated from the repository.
    pub async fn list_users(&self, caller: &SessionUser) -> Result<Vec<PublicUser>, TyreHubError> {
        caller.require_role(Role::Admin)?;
        let users = self.storage.users().get_all().await?;
        Ok(users.into_iter().map(PublicUser::from).collect())
    }

    /// # Errors
    ///
    /// Returns [`TyreHubError::Unauthorized`] for non-admin callers, or a
    /// storage error propagated from the repository.
    pub async fn list_dealers(&self, caller: &SessionUser) -> Result<Vec<Dealer>, TyreHubError> {
        caller.require_role(Role::Admin)?;
        self.storage.dealers().get_all().await
    }

    /// Mark a dealer as verified. Verifying twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Unauthorized`] for non-admin callers and
    /// [`TyreHubError::NotFound`] if the dealer does not exist.
    #[tracing::instrument(skip(self, caller))]
    pub async fn verify_dealer(
        &self,
        caller: &SessionUser,
        id: DealerId,
    ) -> Result<Dealer, TyreHubError> {
        caller.require_role(Role::Admin)?;
        let mut dealer = self
            .storage
            .dealers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Dealer",
                id: id.to_string(),
            })?;
        if dealer.verified {
            return Ok(dealer);
        }
        dealer.verified = true;
        let dealer = self.storage.dealers().update(dealer).await?;
        tracing::info!(dealer_id = %dealer.id, "dealer verified");
        Ok(dealer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tyrehub_domain::booking::ServiceBooking;
    use tyrehub_domain::catalog::{Brand, Tyre};
    use tyrehub_domain::error::AuthError;
    use tyrehub_domain::id::UserId;
    use tyrehub_domain::order::OrderLine;
    use tyrehub_domain::time::{hours_after, now};

    use crate::testing::{InMemoryStorage, user_with_role};

    fn make_service() -> (AdminService<InMemoryStorage>, Arc<InMemoryStorage>) {
        let storage = Arc::new(InMemoryStorage::default());
        (AdminService::new(Arc::clone(&storage)), storage)
    }

    /// An admin caller that is not stored, so it does not show up in counts.
    fn admin() -> SessionUser {
        SessionUser {
            user_id: UserId::new(),
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            role: Role::Admin,
        }
    }

    fn order_for(storage: &InMemoryStorage, tyre: &Tyre, quantity: i64) -> Order {
        let buyer = user_with_role(storage, &format!("{quantity}@buyers.test"), Role::Customer);
        let line = OrderLine {
            tyre_id: tyre.id,
            quantity,
            unit_price_cents: tyre.price_cents,
        };
        Order::place(buyer.id, None, &[line]).unwrap()
    }

    #[tokio::test]
    async fn should_return_zero_stats_for_empty_store() {
        let (svc, _) = make_service();
        assert_eq!(svc.stats(&admin()).await.unwrap(), AdminStats::default());
    }

    #[tokio::test]
    async fn should_aggregate_store_totals() {
        let (svc, storage) = make_service();
        user_with_role(&storage, "root@example.com", Role::Admin);
        user_with_role(&storage, "shop@example.com", Role::Dealer);
        let brand = storage.insert_brand(Brand::new("Michelin", None).unwrap());
        let tyre = storage.insert_tyre(
            Tyre::builder()
                .brand_id(brand.id)
                .name("Pilot Sport 5")
                .size("225/45 R17")
                .price_cents(15_000)
                .stock(4)
                .build()
                .unwrap(),
        );
        storage.insert_order(order_for(&storage, &tyre, 2));
        let mut cancelled = order_for(&storage, &tyre, 3);
        cancelled.status = OrderStatus::Cancelled;
        storage.insert_order(cancelled);
        let booker = user_with_role(&storage, "booker@example.com", Role::Customer);
        storage.insert_booking(
            ServiceBooking::schedule(
                booker.id,
                "fitting",
                hours_after(now(), 24),
                None,
                None,
                now(),
            )
            .unwrap(),
        );

        let stats = svc.stats(&admin()).await.unwrap();

        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.total_customers, 3);
        assert_eq!(stats.total_dealers, 1);
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.total_revenue_cents, 30_000);
        assert_eq!(stats.total_tyres, 1);
        assert_eq!(stats.total_brands, 1);
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.pending_bookings, 1);
    }

    #[tokio::test]
    async fn should_clamp_recent_orders_limit() {
        let (svc, storage) = make_service();
        let brand = storage.insert_brand(Brand::new("Pirelli", None).unwrap());
        let tyre = storage.insert_tyre(
            Tyre::builder()
                .brand_id(brand.id)
                .name("P Zero")
                .size("245/40 R18")
                .price_cents(20_000)
                .build()
                .unwrap(),
        );
        for quantity in 1..=12 {
            let mut order = order_for(&storage, &tyre, quantity);
            order.created_at = now() - Duration::minutes(quantity);
            storage.insert_order(order);
        }

        assert_eq!(svc.recent_orders(&admin(), None).await.unwrap().len(), 10);
        assert_eq!(svc.recent_orders(&admin(), Some(0)).await.unwrap().len(), 1);
        assert_eq!(svc.recent_orders(&admin(), Some(500)).await.unwrap().len(), 12);

        let recent = svc.recent_orders(&admin(), Some(3)).await.unwrap();
        let quantities: Vec<i64> = recent.iter().map(|o| o.items[0].quantity).collect();
        assert_eq!(quantities, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn should_list_users_without_credentials() {
        let (svc, storage) = make_service();
        user_with_role(&storage, "a@example.com", Role::Customer);

        let users = svc.list_users(&admin()).await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "a@example.com");
    }

    #[tokio::test]
    async fn should_verify_dealer() {
        let (svc, storage) = make_service();
        let owner = user_with_role(&storage, "shop@example.com", Role::Dealer);
        let dealer = storage.insert_dealer(Dealer::for_user(owner.id, "Rubber Road", None, None).unwrap());

        let verified = svc.verify_dealer(&admin(), dealer.id).await.unwrap();

        assert!(verified.verified);
        assert!(storage.stored_dealer(dealer.id).unwrap().verified);
        assert_eq!(svc.list_dealers(&admin()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_dealer() {
        let (svc, _) = make_service();

        let result = svc.verify_dealer(&admin(), DealerId::new()).await;

        assert!(matches!(result, Err(TyreHubError::NotFound(ref e)) if e.entity == "Dealer"));
    }

    #[tokio::test]
    async fn should_reject_non_admin_caller() {
        let (svc, storage) = make_service();
        let owner = user_with_role(&storage, "shop@example.com", Role::Dealer);
        let dealer = storage.insert_dealer(Dealer::for_user(owner.id, "Rubber Road", None, None).unwrap());
        let customer = SessionUser::from(&user_with_role(&storage, "dana@example.com", Role::Customer));

        assert!(matches!(
            svc.stats(&customer).await,
            Err(TyreHubError::Unauthorized(AuthError::WrongRole { .. }))
        ));
        assert!(matches!(
            svc.verify_dealer(&customer, dealer.id).await,
            Err(TyreHubError::Unauthorized(_))
        ));
        assert!(svc.list_users(&customer).await.is_err());
        assert!(!storage.stored_dealer(dealer.id).unwrap().verified);
    }
}
