//! Dealer profile: the secondary record attached to a `DEALER` user.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{DealerId, UserId};
use crate::time::{Timestamp, now};

/// Store-side business account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealer {
    pub id: DealerId,
    pub user_id: UserId,
    pub business_name: String,
    pub business_address: Option<String>,
    pub tax_number: Option<String>,
    pub verified: bool,
    pub created_at: Timestamp,
}

impl Dealer {
    /// Unverified profile for a newly registered dealer.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when `business_name` is blank.
    pub fn for_user(
        user_id: UserId,
        business_name: &str,
        business_address: Option<String>,
        tax_number: Option<String>,
    ) -> Result<Self, ValidationError> {
        let business_name = business_name.trim();
        if business_name.is_empty() {
            return Err(ValidationError::MissingField("business_name"));
        }
        Ok(Self {
            id: DealerId::new(),
            user_id,
            business_name: business_name.to_string(),
            business_address: business_address.filter(|a| !a.trim().is_empty()),
            tax_number: tax_number.filter(|t| !t.trim().is_empty()),
            verified: false,
            created_at: now(),
        })
    }
}
