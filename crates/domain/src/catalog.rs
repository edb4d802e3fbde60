//! Catalog: tyre brands and the tyres sold under them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{BrandId, TyreId};
use crate::time::{Timestamp, now};

/// A tyre manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub country: Option<String>,
    pub created_at: Timestamp,
}

impl Brand {
    /// Create a brand, rejecting a blank name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when `name` is blank.
    pub fn new(name: &str, country: Option<String>) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        Ok(Self {
            id: BrandId::new(),
            name: name.to_string(),
            country,
            created_at: now(),
        })
    }
}

/// Intended driving season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    Summer,
    Winter,
    AllSeason,
}

impl Season {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summer => "SUMMER",
            Self::Winter => "WINTER",
            Self::AllSeason => "ALL_SEASON",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUMMER" => Ok(Self::Summer),
            "WINTER" => Ok(Self::Winter),
            "ALL_SEASON" => Ok(Self::AllSeason),
            _ => Err(ValidationError::InvalidValue {
                field: "season",
                value: s.to_string(),
            }),
        }
    }
}

/// A sellable tyre model in one size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tyre {
    pub id: TyreId,
    pub brand_id: BrandId,
    pub name: String,
    /// Size designation, e.g. `205/55 R16`.
    pub size: String,
    pub season: Season,
    pub price_cents: i64,
    pub stock: i64,
    pub created_at: Timestamp,
}

impl Tyre {
    /// Create a builder for constructing a [`Tyre`].
    #[must_use]
    pub fn builder() -> TyreBuilder {
        TyreBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when name or size are blank, or price or
    /// stock are negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.size.trim().is_empty() {
            return Err(ValidationError::MissingField("size"));
        }
        if self.price_cents < 0 {
            return Err(ValidationError::NegativeAmount("price_cents"));
        }
        if self.stock < 0 {
            return Err(ValidationError::NegativeAmount("stock"));
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Tyre`].
#[derive(Debug, Default)]
pub struct TyreBuilder {
    brand_id: Option<BrandId>,
    name: Option<String>,
    size: Option<String>,
    season: Option<Season>,
    price_cents: i64,
    stock: i64,
}

impl TyreBuilder {
    #[must_use]
    pub fn brand_id(mut self, brand_id: BrandId) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    #[must_use]
    pub fn season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    #[must_use]
    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = price_cents;
        self
    }

    #[must_use]
    pub fn stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Consume the builder, validate, and return a [`Tyre`].
    ///
    /// Season defaults to [`Season::AllSeason`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the brand is missing or invariants fail.
    pub fn build(self) -> Result<Tyre, ValidationError> {
        let brand_id = self
            .brand_id
            .ok_or(ValidationError::MissingField("brand_id"))?;
        let tyre = Tyre {
            id: TyreId::new(),
            brand_id,
            name: self.name.unwrap_or_default(),
            size: self.size.unwrap_or_default(),
            season: self.season.unwrap_or(Season::AllSeason),
            price_cents: self.price_cents,
            stock: self.stock,
            created_at: now(),
        };
        tyre.validate()?;
        Ok(tyre)
    }
}
