//! Flat aggregate records returned by the dashboard stats endpoints.

use serde::{Deserialize, Serialize};

/// Store-wide totals for administrators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_customers: i64,
    pub total_dealers: i64,
    pub total_orders: i64,
    pub pending_orders: i64,
    /// Sum over orders that are not cancelled.
    pub total_revenue_cents: i64,
    pub total_tyres: i64,
    pub total_brands: i64,
    pub total_reviews: i64,
    pub pending_bookings: i64,
}

/// Totals scoped to one customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub total_spent_cents: i64,
    pub loyalty_points: i64,
    pub upcoming_bookings: i64,
    pub reviews_written: i64,
}

/// Totals scoped to one dealer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealerStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub total_revenue_cents: i64,
    pub total_customers: i64,
    /// Placeholder percentage, not derived from order history.
    pub monthly_growth: f64,
}
