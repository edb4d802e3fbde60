//! Customer reviews of tyres.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{ReviewId, TyreId, UserId};
use crate::time::{Timestamp, now};

/// A star rating with an optional comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub tyre_id: TyreId,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl Review {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRating`] unless `rating` is in `1..=5`.
    pub fn new(
        user_id: UserId,
        tyre_id: TyreId,
        rating: u8,
        comment: Option<String>,
    ) -> Result<Self, ValidationError> {
        if !(1..=5).contains(&rating) {
            return Err(ValidationError::InvalidRating(rating));
        }
        Ok(Self {
            id: ReviewId::new(),
            user_id,
            tyre_id,
            rating,
            comment: comment.filter(|c| !c.trim().is_empty()),
            created_at: now(),
        })
    }
}
