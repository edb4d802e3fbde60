//! Orders and their line items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{DealerId, OrderId, OrderItemId, TyreId, UserId};
use crate::time::{Timestamp, now};

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PROCESSING" => Ok(Self::Processing),
            "SHIPPED" => Ok(Self::Shipped),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ValidationError::InvalidValue {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// One tyre line within an order. The unit price is captured at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub tyre_id: TyreId,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl OrderItem {
    #[must_use]
    pub fn subtotal_cents(&self) -> i64 {
        self.quantity * self.unit_price_cents
    }
}

/// Input for a single line when placing an order.
#[derive(Debug, Clone, Copy)]
pub struct OrderLine {
    pub tyre_id: TyreId,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

/// A purchase by a user, optionally fulfilled by a dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub dealer_id: Option<DealerId>,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
}

impl Order {
    /// Place a new pending order; the total is derived from the lines.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when there are no lines, a quantity is
    /// below one, or a unit price is negative.
    pub fn place(
        user_id: UserId,
        dealer_id: Option<DealerId>,
        lines: &[OrderLine],
    ) -> Result<Self, ValidationError> {
        let id = OrderId::new();
        let items: Vec<OrderItem> = lines
            .iter()
            .map(|line| OrderItem {
                id: OrderItemId::new(),
                order_id: id,
                tyre_id: line.tyre_id,
                quantity: line.quantity,
                unit_price_cents: line.unit_price_cents,
            })
            .collect();
        let order = Self {
            id,
            user_id,
            dealer_id,
            status: OrderStatus::Pending,
            total_cents: items.iter().map(OrderItem::subtotal_cents).sum(),
            items,
            created_at: now(),
        };
        order.validate()?;
        Ok(order)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the order has no items or an item
    /// is malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }
        for item in &self.items {
            if item.quantity < 1 {
                return Err(ValidationError::InvalidQuantity);
            }
            if item.unit_price_cents < 0 {
                return Err(ValidationError::NegativeAmount("unit_price_cents"));
            }
        }
        Ok(())
    }

    /// Whether this order still counts towards revenue.
    #[must_use]
    pub fn is_billable(&self) -> bool {
        self.status != OrderStatus::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i64, unit_price_cents: i64) -> OrderLine {
        OrderLine {
            tyre_id: TyreId::new(),
            quantity,
            unit_price_cents,
        }
    }

    #[test]
    fn should_sum_line_subtotals_into_total() {
        let order = Order::place(UserId::new(), None, &[line(4, 9_950), line(1, 2_500)]).unwrap();
        assert_eq!(order.total_cents, 4 * 9_950 + 2_500);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.items.iter().all(|item| item.order_id == order.id));
    }

    #[test]
    fn should_reject_order_without_lines() {
        let result = Order::place(UserId::new(), None, &[]);
        assert_eq!(result, Err(ValidationError::EmptyOrder));
    }

    #[test]
    fn should_reject_zero_quantity() {
        let result = Order::place(UserId::new(), None, &[line(0, 100)]);
        assert_eq!(result, Err(ValidationError::InvalidQuantity));
    }

    #[test]
    fn should_not_bill_cancelled_orders() {
        let mut order = Order::place(UserId::new(), None, &[line(1, 100)]).unwrap();
        assert!(order.is_billable());
        order.status = OrderStatus::Cancelled;
        assert!(!order.is_billable());
    }

    #[test]
    fn should_serialize_status_in_upper_case() {
        let json = serde_json::to_value(OrderStatus::Processing).unwrap();
        assert_eq!(json, "PROCESSING");
    }
}
