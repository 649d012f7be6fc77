//! Revenue, cost and profit over delivered orders and stock purchases.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{COST_PER_KG, CustomerType};

/// Time window keyword accepted by the listing and report endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Since midnight today (EAT).
    Day,
    /// The last 7 days.
    Week,
    /// The last 30 days.
    Month,
    /// No lower bound.
    All,
}

impl ReportPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Day => "day",
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::All => "all",
        }
    }

    /// Inclusive lower bound of the window ending at `now`, in `now`'s offset.
    pub fn start(&self, now: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        match self {
            ReportPeriod::Day => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .and_then(|midnight| midnight.and_local_timezone(*now.offset()).single()),
            ReportPeriod::Week => Some(now - Duration::days(7)),
            ReportPeriod::Month => Some(now - Duration::days(30)),
            ReportPeriod::All => None,
        }
    }
}

/// A delivered order as seen by the sales report.
#[derive(Debug, Clone, Copy)]
pub struct SaleLine {
    pub customer_type: CustomerType,
    pub quantity_kg: i64,
    pub total_amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct SalesSummary {
    pub total_orders: i64,
    pub total_revenue: i64,
    pub total_kg_sold: i64,
    pub total_cost: i64,
    pub profit: i64,
    pub restaurant_orders: i64,
    pub individual_orders: i64,
    pub restaurant_revenue: i64,
    pub individual_revenue: i64,
}

pub fn summarize_sales(lines: impl IntoIterator<Item = SaleLine>) -> SalesSummary {
    let mut summary = SalesSummary::default();
    for line in lines {
        summary.total_orders = summary.total_orders.saturating_add(1);
        summary.total_revenue = summary.total_revenue.saturating_add(line.total_amount);
        summary.total_kg_sold = summary.total_kg_sold.saturating_add(line.quantity_kg);
        match line.customer_type {
            CustomerType::Restaurant => {
                summary.restaurant_orders = summary.restaurant_orders.saturating_add(1);
                summary.restaurant_revenue =
                    summary.restaurant_revenue.saturating_add(line.total_amount);
            }
            CustomerType::Individual => {
                summary.individual_orders = summary.individual_orders.saturating_add(1);
                summary.individual_revenue =
                    summary.individual_revenue.saturating_add(line.total_amount);
            }
        }
    }
    summary.total_cost = summary.total_kg_sold.saturating_mul(COST_PER_KG);
    summary.profit = summary.total_revenue.saturating_sub(summary.total_cost);
    summary
}

/// A stock purchase as seen by the inventory report.
#[derive(Debug, Clone, Copy)]
pub struct Purchase {
    pub bags_added: i64,
    pub total_kg: i64,
    pub cost_per_bag: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct InventorySummary {
    pub total_bags_purchased: i64,
    pub total_kg_purchased: i64,
    pub total_purchase_cost: i64,
    pub sold_kg: i64,
    pub sold_revenue: i64,
    pub available_kg: i64,
    pub cost_of_sold: i64,
    pub profit: i64,
}

/// `delivered` yields `(quantity_kg, total_amount)` per delivered order.
///
/// Cost of sold goods uses the flat [`COST_PER_KG`], not the recorded purchase prices.
pub fn summarize_inventory(
    purchases: impl IntoIterator<Item = Purchase>,
    delivered: impl IntoIterator<Item = (i64, i64)>,
) -> InventorySummary {
    let mut summary = InventorySummary::default();
    for p in purchases {
        summary.total_bags_purchased = summary.total_bags_purchased.saturating_add(p.bags_added);
        summary.total_kg_purchased = summary.total_kg_purchased.saturating_add(p.total_kg);
        summary.total_purchase_cost = summary
            .total_purchase_cost
            .saturating_add(p.bags_added.saturating_mul(p.cost_per_bag));
    }
    for (kg, amount) in delivered {
        summary.sold_kg = summary.sold_kg.saturating_add(kg);
        summary.sold_revenue = summary.sold_revenue.saturating_add(amount);
    }
    summary.available_kg = summary.total_kg_purchased.saturating_sub(summary.sold_kg);
    summary.cost_of_sold = summary.sold_kg.saturating_mul(COST_PER_KG);
    summary.profit = summary.sold_revenue.saturating_sub(summary.cost_of_sold);
    summary
}
