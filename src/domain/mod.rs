//! Business rules for the rice trade: password policy, pricing, stock arithmetic, delivery
//! lifecycle and report aggregation.
//!
//! Nothing in here touches the database. Services load rows, hand plain values to these
//! functions and persist what comes back.

use thiserror::Error;

pub mod order;
pub mod password;
pub mod pricing;
pub mod report;
pub mod stock;

pub use order::{DeliveryStatus, validate_order_quantity};
pub use password::validate_password;
pub use pricing::CustomerType;
pub use report::ReportPeriod;
pub use stock::StockLevel;

/// One bag of rice always weighs 60 kg.
pub const KG_PER_BAG: i64 = 60;

/// Purchase price of a bag when the caller does not state one (KES).
pub const DEFAULT_COST_PER_BAG: i64 = 9_000;

/// Cost of goods used by the reports, derived from the standard bag price (KES 150/kg).
pub const COST_PER_KG: i64 = DEFAULT_COST_PER_BAG / KG_PER_BAG;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Password must contain at least one letter")]
    PasswordMissingLetter,

    #[error("Password must contain at least one number")]
    PasswordMissingDigit,

    #[error("Password must contain at least one special character")]
    PasswordMissingSymbol,

    #[error("Quantity must be at least 5kg and in multiples of 5kg")]
    InvalidQuantity,

    #[error("Number of bags must be positive")]
    BagsNotPositive,

    #[error("Number of bags cannot exceed {max} per record")]
    TooManyBags { max: i64 },

    #[error("Quantity cannot exceed {max}kg per order")]
    QuantityTooLarge { max: i64 },

    #[error("Cost per bag cannot be negative")]
    NegativeCost,

    #[error("Cost per bag cannot exceed {max}")]
    CostTooHigh { max: i64 },

    #[error("Customer type must be restaurant or individual")]
    InvalidCustomerType,

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Insufficient inventory: {available}kg available, {requested}kg requested")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("Inventory cannot drop below the {delivered_kg}kg already delivered")]
    BelowDelivered { delivered_kg: i64 },

    #[error("Only pending orders can be edited")]
    OrderNotPending,

    #[error("Order is already {0} and cannot change status")]
    StatusLocked(DeliveryStatus),
}
