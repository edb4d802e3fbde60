//! Customer profile: the secondary record attached to a `CUSTOMER` user.

use serde::{Deserialize, Serialize};

use crate::id::{CustomerId, UserId};
use crate::time::{Timestamp, now};

/// Shopping profile of a customer account.
///
/// `loyalty_points` is accumulated elsewhere; this system only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub user_id: UserId,
    pub address: Option<String>,
    pub loyalty_points: i64,
    pub created_at: Timestamp,
}

impl Customer {
    /// Fresh profile for a newly registered user, with no points.
    #[must_use]
    pub fn for_user(user_id: UserId, address: Option<String>) -> Self {
        Self {
            id: CustomerId::new(),
            user_id,
            address: address.filter(|a| !a.trim().is_empty()),
            loyalty_points: 0,
            created_at: now(),
        }
    }
}
