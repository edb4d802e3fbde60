//! A user together with the profile their role implies.

use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::dealer::Dealer;
use crate::user::PublicUser;

/// Result of a successful registration. Exactly one profile is set for
/// customer and dealer accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub user: PublicUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer: Option<Dealer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAccount {
    pub user: PublicUser,
    pub customer: Customer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerAccount {
    pub user: PublicUser,
    pub dealer: Dealer,
}
