use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::{
        ReportPeriod,
        report::{InventorySummary, SalesSummary},
    },
    models::InventoryRecord,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesReport {
    pub period: ReportPeriod,
    pub start_date: Option<DateTime<FixedOffset>>,
    pub end_date: DateTime<FixedOffset>,
    #[serde(flatten)]
    pub summary: SalesSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryReport {
    /// `all` when every user's records were aggregated, `mine` when limited to the caller.
    pub scope: String,
    #[serde(flatten)]
    pub summary: InventorySummary,
    pub inventory_records: Vec<InventoryRecord>,
}
