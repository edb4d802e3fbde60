//! Customer service: the signed-in customer's own dashboard data.

use std::sync::Arc;

use tyrehub_domain::account::CustomerAccount;
use tyrehub_domain::error::{NotFoundError, TyreHubError};
use tyrehub_domain::order::{Order, OrderStatus};
use tyrehub_domain::session::SessionUser;
use tyrehub_domain::stats::CustomerStats;
use tyrehub_domain::time::now;
use tyrehub_domain::user::Role;

use crate::ports::{
    CustomerRepository, OrderRepository, OrderScope, ReviewRepository, ServiceBookingRepository,
    Storage, UserRepository,
};

/// Application service behind the customer dashboard.
pub struct CustomerService<S> {
    storage: Arc<S>,
}

impl<S: Storage> CustomerService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Totals for the calling customer.
    ///
    /// A customer without a profile row reports zero loyalty points.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Unauthorized`] unless the caller is a
    /// customer, or a storage error.
    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id))]
    pub async fn stats(&self, caller: &SessionUser) -> Result<CustomerStats, TyreHubError> {
        caller.require_role(Role::Customer)?;
        let s = &*self.storage;
        let scope = OrderScope::Buyer(caller.user_id);
        let (total_orders, pending_orders, total_spent_cents, profile, upcoming_bookings, reviews_written) =
            tokio::try_join!(
                s.orders().count(scope, None),
                s.orders().count(scope, Some(OrderStatus::Pending)),
                s.orders().total_amount(scope),
                s.customers().find_by_user_id(caller.user_id),
                s.bookings().count_upcoming_for_user(caller.user_id, now()),
                s.reviews().count_by_user(caller.user_id),
            )?;

        Ok(CustomerStats {
            total_orders,
            pending_orders,
            total_spent_cents,
            loyalty_points: profile.map_or(0, |c| c.loyalty_points),
            upcoming_bookings,
            reviews_written,
        })
    }

    /// Orders the caller placed, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Unauthorized`] unless the caller is a
    /// customer, or a storage error.
    pub async fn orders(&self, caller: &SessionUser) -> Result<Vec<Order>, TyreHubError> {
        caller.require_role(Role::Customer)?;
        self.storage.orders().find_by_user(caller.user_id).await
    }

    /// The caller's account and customer profile.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Unauthorized`] unless the caller is a
    /// customer, and [`TyreHubError::NotFound`] when the account or its
    /// profile is missing.
    pub async fn profile(&self, caller: &SessionUser) -> Result<CustomerAccount, TyreHubError> {
        caller.require_role(Role::Customer)?;
        let user = self.storage.users().get_by_id(caller.user_id).await?;
        let customer = self.storage.customers().find_by_user_id(caller.user_id).await?;
        match (user, customer) {
            (Some(user), Some(customer)) => Ok(CustomerAccount {
                user: user.to_public(),
                customer,
            }),
            _ => Err(not_found(caller)),
        }
    }
}

fn not_found(caller: &SessionUser) -> TyreHubError {
    NotFoundError {
        entity: "Customer",
        id: caller.user_id.to_string(),
    }
    .into()
}
