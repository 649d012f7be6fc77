use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ReportPeriod;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PeriodQuery {
    pub period: Option<ReportPeriod>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CustomerListQuery {
    #[serde(rename = "type")]
    pub customer_type: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub customer_id: Option<i32>,
    pub period: Option<ReportPeriod>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportScope {
    /// Every user's records. Matches how the inventory report has always behaved.
    #[default]
    All,
    /// Only the caller's records.
    Mine,
}

impl ReportScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportScope::All => "all",
            ReportScope::Mine => "mine",
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct InventoryReportQuery {
    pub scope: Option<ReportScope>,
}
