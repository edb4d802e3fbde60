//! Dealer service: the signed-in dealer's own dashboard data.

use std::sync::Arc;

use rand::Rng;

use tyrehub_domain::account::DealerAccount;
use tyrehub_domain::dealer::Dealer;
use tyrehub_domain::error::{NotFoundError, TyreHubError};
use tyrehub_domain::order::{Order, OrderStatus};
use tyrehub_domain::session::SessionUser;
use tyrehub_domain::stats::DealerStats;
use tyrehub_domain::user::Role;

use crate::ports::{DealerRepository, OrderRepository, OrderScope, Storage, UserRepository};

/// Stand-in for a month-over-month figure: a percentage in `[0, 20)` with
/// one decimal. There is no order history model to derive it from yet.
fn placeholder_growth() -> f64 {
    let raw: f64 = rand::thread_rng().gen_range(0.0..20.0);
    ((raw * 10.0).round() / 10.0).min(19.9)
}

/// Application service behind the dealer dashboard.
pub struct DealerService<S> {
    storage: Arc<S>,
}

impl<S: Storage> DealerService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    async fn dealer_of(&self, caller: &SessionUser) -> Result<Dealer, TyreHubError> {
        caller.require_role(Role::Dealer)?;
        self.storage
            .dealers()
            .find_by_user_id(caller.user_id)
            .await?
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Dealer",
                    id: caller.user_id.to_string(),
                }
                .into()
            })
    }

    /// Totals over orders fulfilled by the calling dealer.
    ///
    /// `monthly_growth` is a placeholder value, see [`DealerStats`].
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Unauthorized`] unless the caller is a dealer,
    /// [`TyreHubError::NotFound`] when the dealer profile is missing, or a
    /// storage error.
    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id))]
    pub async fn stats(&self, caller: &SessionUser) -> Result<DealerStats, TyreHubError> {
        let dealer = self.dealer_of(caller).await?;
        let orders = self.storage.orders();
        let scope = OrderScope::Seller(dealer.id);
        let (total_orders, pending_orders, total_revenue_cents, total_customers) = tokio::try_join!(
            orders.count(scope, None),
            orders.count(scope, Some(OrderStatus::Pending)),
            orders.total_amount(scope),
            orders.count_distinct_customers(dealer.id),
        )?;

        Ok(DealerStats {
            total_orders,
            pending_orders,
            total_revenue_cents,
            total_customers,
            monthly_growth: placeholder_growth(),
        })
    }

    /// Orders fulfilled by the caller, newest first.
    ///
    /// # Errors
    ///
    /// Same as [`DealerService::stats`].
    pub async fn orders(&self, caller: &SessionUser) -> Result<Vec<Order>, TyreHubError> {
        let dealer = self.dealer_of(caller).await?;
        self.storage.orders().find_by_dealer(dealer.id).await
    }

    /// The caller's account and business profile.
    ///
    /// # Errors
    ///
    /// Same as [`DealerService::stats`].
    pub async fn profile(&self, caller: &SessionUser) -> Result<DealerAccount, TyreHubError> {
        let dealer = self.dealer_of(caller).await?;
        let user = self
            .storage
            .users()
            .get_by_id(caller.user_id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "User",
                id: caller.user_id.to_string(),
            })?;
        Ok(DealerAccount {
            user: user.to_public(),
            dealer,
        })
    }
}
