use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::DomainError;

pub const MIN_ORDER_KG: i64 = 5;
pub const ORDER_KG_STEP: i64 = 5;
pub const MAX_ORDER_KG: i64 = 10_000_000;

/// Orders are sold in whole 5 kg steps starting at 5 kg. Returns the quantity as whole kg.
pub fn validate_order_quantity(quantity_kg: f64) -> Result<i64, DomainError> {
    if !quantity_kg.is_finite()
        || quantity_kg < MIN_ORDER_KG as f64
        || quantity_kg % ORDER_KG_STEP as f64 != 0.0
    {
        return Err(DomainError::InvalidQuantity);
    }
    if quantity_kg > MAX_ORDER_KG as f64 {
        return Err(DomainError::QuantityTooLarge { max: MAX_ORDER_KG });
    }
    Ok(quantity_kg as i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, DeliveryStatus::Pending)
    }

    /// Validates a status change. Delivered and cancelled orders are final.
    pub fn transition(self, next: DeliveryStatus) -> Result<DeliveryStatus, DomainError> {
        if self.is_terminal() {
            return Err(DomainError::StatusLocked(self));
        }
        Ok(next)
    }

    pub fn ensure_editable(&self) -> Result<(), DomainError> {
        if *self != DeliveryStatus::Pending {
            return Err(DomainError::OrderNotPending);
        }
        Ok(())
    }
}

impl FromStr for DeliveryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DeliveryStatus::Pending),
            "delivered" => Ok(DeliveryStatus::Delivered),
            "cancelled" => Ok(DeliveryStatus::Cancelled),
            _ => Err(DomainError::InvalidStatus),
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
