use serde::Serialize;
use utoipa::ToSchema;

use super::{DomainError, KG_PER_BAG};

/// Largest delivery a single inventory record may hold (6,000 tonnes).
pub const MAX_BAGS_PER_RECORD: i64 = 100_000;

pub fn bags_to_kg(bags: i64) -> Result<i64, DomainError> {
    bags.checked_mul(KG_PER_BAG).ok_or(DomainError::TooManyBags {
        max: MAX_BAGS_PER_RECORD,
    })
}

pub fn validate_bags(bags: i64) -> Result<i64, DomainError> {
    if bags <= 0 {
        return Err(DomainError::BagsNotPositive);
    }
    if bags > MAX_BAGS_PER_RECORD {
        return Err(DomainError::TooManyBags {
            max: MAX_BAGS_PER_RECORD,
        });
    }
    Ok(bags)
}

/// Upper bound on the recorded purchase price of one bag (KES).
pub const MAX_COST_PER_BAG: i64 = 10_000_000;

pub fn validate_cost_per_bag(cost: i64) -> Result<i64, DomainError> {
    if cost < 0 {
        return Err(DomainError::NegativeCost);
    }
    if cost > MAX_COST_PER_BAG {
        return Err(DomainError::CostTooHigh {
            max: MAX_COST_PER_BAG,
        });
    }
    Ok(cost)
}

/// Stock position for one owner.
///
/// Only delivered orders consume stock; pending and cancelled orders never reduce
/// `available_kg`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct StockLevel {
    pub total_bags_added: i64,
    pub total_kg_added: i64,
    pub total_sold_kg: i64,
    pub available_kg: i64,
}

impl StockLevel {
    /// `added` yields `(bags_added, total_kg)` per inventory record, `delivered_kg` the
    /// quantity of every delivered order.
    pub fn tally(
        added: impl IntoIterator<Item = (i64, i64)>,
        delivered_kg: impl IntoIterator<Item = i64>,
    ) -> Self {
        let (total_bags_added, total_kg_added) = added
            .into_iter()
            .fold((0i64, 0i64), |(bags, kg), (b, k)| {
                (bags.saturating_add(b), kg.saturating_add(k))
            });
        let total_sold_kg = delivered_kg
            .into_iter()
            .fold(0i64, |sold, kg| sold.saturating_add(kg));
        Self {
            total_bags_added,
            total_kg_added,
            total_sold_kg,
            available_kg: total_kg_added.saturating_sub(total_sold_kg),
        }
    }

    /// Fails when deliveries already exceed what the ledger says was added.
    pub fn ensure_covers_deliveries(&self) -> Result<(), DomainError> {
        if self.available_kg < 0 {
            return Err(DomainError::BelowDelivered {
                delivered_kg: self.total_sold_kg,
            });
        }
        Ok(())
    }

    /// Available stock expressed in bags, rounded to two decimals.
    pub fn available_bags(&self) -> f64 {
        round2(self.available_kg as f64 / KG_PER_BAG as f64)
    }

    pub fn ensure_available(&self, requested_kg: i64) -> Result<(), DomainError> {
        if self.available_kg < requested_kg {
            return Err(DomainError::InsufficientStock {
                available: self.available_kg,
                requested: requested_kg,
            });
        }
        Ok(())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_bag_is_sixty_kilos() {
        assert_eq!(bags_to_kg(10), Ok(600));
        assert_eq!(bags_to_kg(1), Ok(60));
        assert!(bags_to_kg(i64::MAX).is_err());
    }

    #[test]
    fn bags_must_be_positive_and_bounded() {
        assert_eq!(validate_bags(3), Ok(3));
        assert_eq!(validate_bags(MAX_BAGS_PER_RECORD), Ok(MAX_BAGS_PER_RECORD));
        assert_eq!(validate_bags(0), Err(DomainError::BagsNotPositive));
        assert_eq!(validate_bags(-2), Err(DomainError::BagsNotPositive));
        assert_eq!(
            validate_bags(i64::MAX),
            Err(DomainError::TooManyBags {
                max: MAX_BAGS_PER_RECORD
            })
        );
    }

    #[test]
    fn tally_saturates_instead_of_wrapping() {
        let level = StockLevel::tally([(1, i64::MAX), (1, i64::MAX)], [i64::MAX]);
        assert_eq!(level.total_kg_added, i64::MAX);
        assert_eq!(level.total_sold_kg, i64::MAX);
        assert_eq!(level.available_kg, 0);
    }

    #[test]
    fn deliveries_beyond_stock_are_detected() {
        let level = StockLevel::tally([(1, 60)], [300]);
        assert_eq!(
            level.ensure_covers_deliveries(),
            Err(DomainError::BelowDelivered { delivered_kg: 300 })
        );
        assert!(StockLevel::tally([(5, 300)], [300]).ensure_covers_deliveries().is_ok());
    }

    #[test]
    fn cost_may_be_zero_but_not_negative() {
        assert_eq!(validate_cost_per_bag(0), Ok(0));
        assert_eq!(validate_cost_per_bag(-1), Err(DomainError::NegativeCost));
        assert_eq!(
            validate_cost_per_bag(i64::MAX),
            Err(DomainError::CostTooHigh {
                max: MAX_COST_PER_BAG
            })
        );
    }

    #[test]
    fn available_is_added_minus_delivered() {
        let level = StockLevel::tally([(10, 600), (2, 120)], [50, 25]);
        assert_eq!(level.total_bags_added, 12);
        assert_eq!(level.total_kg_added, 720);
        assert_eq!(level.total_sold_kg, 75);
        assert_eq!(level.available_kg, 645);
        assert_eq!(level.available_bags(), 10.75);
    }

    #[test]
    fn empty_ledger_is_all_zero() {
        let level = StockLevel::tally(Vec::new(), Vec::new());
        assert_eq!(level, StockLevel::default());
        assert_eq!(level.available_bags(), 0.0);
    }

    #[test]
    fn availability_check_allows_exact_quantity() {
        let level = StockLevel::tally([(1, 60)], []);
        assert!(level.ensure_available(60).is_ok());
        assert_eq!(
            level.ensure_available(65),
            Err(DomainError::InsufficientStock {
                available: 60,
                requested: 65
            })
        );
    }

    #[test]
    fn bags_are_rounded_to_two_decimals() {
        let level = StockLevel::tally([(1, 60)], [5]);
        assert_eq!(level.available_bags(), 0.92);
    }
}
