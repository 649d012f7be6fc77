use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{domain::StockLevel, models::InventoryRecord};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddInventoryRequest {
    pub bags: i64,
    /// KES per bag; 9000 when omitted.
    pub cost_per_bag: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateInventoryRequest {
    pub bags: Option<i64>,
    pub cost_per_bag: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryStatus {
    pub available_kg: i64,
    pub available_bags: f64,
    pub total_bags_added: i64,
    pub total_kg_added: i64,
    pub total_sold_kg: i64,
}

impl From<StockLevel> for InventoryStatus {
    fn from(level: StockLevel) -> Self {
        Self {
            available_kg: level.available_kg,
            available_bags: level.available_bags(),
            total_bags_added: level.total_bags_added,
            total_kg_added: level.total_kg_added,
            total_sold_kg: level.total_sold_kg,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct InventoryHistory {
    #[schema(value_type = Vec<InventoryRecord>)]
    pub items: Vec<InventoryRecord>,
}
