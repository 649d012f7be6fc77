use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CustomerType, DeliveryStatus};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub customer_type: CustomerType,
    pub address: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InventoryRecord {
    pub id: i32,
    pub bags_added: i64,
    pub total_kg: i64,
    pub cost_per_bag: i64,
    pub date_added: DateTime<FixedOffset>,
    pub formatted_date: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub quantity_kg: i64,
    pub price_per_kg: i64,
    pub total_amount: i64,
    pub order_date: DateTime<FixedOffset>,
    pub delivery_status: DeliveryStatus,
    pub delivery_date: Option<DateTime<FixedOffset>>,
}
