use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{DomainError, order::MAX_ORDER_KG};

pub const RESTAURANT_PRICE_PER_KG: i64 = 180;
pub const INDIVIDUAL_PRICE_PER_KG: i64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    Restaurant,
    Individual,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Restaurant => "restaurant",
            CustomerType::Individual => "individual",
        }
    }

    /// Selling price in KES per kg.
    pub fn price_per_kg(&self) -> i64 {
        match self {
            CustomerType::Restaurant => RESTAURANT_PRICE_PER_KG,
            CustomerType::Individual => INDIVIDUAL_PRICE_PER_KG,
        }
    }

    /// Order total for `quantity_kg` at this customer's rate.
    pub fn total_for(&self, quantity_kg: i64) -> Result<i64, DomainError> {
        quantity_kg
            .checked_mul(self.price_per_kg())
            .ok_or(DomainError::QuantityTooLarge { max: MAX_ORDER_KG })
    }
}

impl FromStr for CustomerType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restaurant" => Ok(CustomerType::Restaurant),
            "individual" => Ok(CustomerType::Individual),
            _ => Err(DomainError::InvalidCustomerType),
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
