use chrono::{DateTime, FixedOffset};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, PaginatorTrait, Set, TransactionTrait};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    clock::eat_now,
    db::{OrmConn, reset_schema},
    domain::{CustomerType, DEFAULT_COST_PER_BAG, stock::bags_to_kg},
    entity::{Customers, Inventory, Orders, customers, inventory},
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const SERVICE_NAME: &str = "JB-Rice-Pro API";

#[derive(Debug, Serialize, ToSchema)]
pub struct PingData {
    pub status: String,
    pub timestamp: DateTime<FixedOffset>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthData {
    /// `healthy` when the database answers, `warning` otherwise.
    pub status: String,
    pub database: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub endpoints: String,
    pub database: String,
    pub timestamp: DateTime<FixedOffset>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InitDbData {
    pub tables_created: Vec<String>,
}

pub fn ping() -> ApiResponse<PingData> {
    ApiResponse::success(
        "pong",
        PingData {
            status: "alive".to_string(),
            timestamp: eat_now(),
        },
        Some(Meta::empty()),
    )
}

pub async fn health(state: &AppState) -> ApiResponse<HealthData> {
    let (status, database) = match database_status(&state.orm).await {
        Ok(()) => ("healthy", "connected".to_string()),
        Err(message) => ("warning", message),
    };
    ApiResponse::success(
        format!("{SERVICE_NAME} is running"),
        HealthData {
            status: status.to_string(),
            database,
        },
        Some(Meta::empty()),
    )
}

pub async fn service_info(state: &AppState) -> ApiResponse<ServiceInfo> {
    let database = match database_status(&state.orm).await {
        Ok(()) => "connected".to_string(),
        Err(message) => message,
    };
    ApiResponse::success(
        format!("{SERVICE_NAME} is running"),
        ServiceInfo {
            endpoints: "/api/*".to_string(),
            database,
            timestamp: eat_now(),
        },
        Some(Meta::empty()),
    )
}

/// Drops and recreates every table. All data is lost.
pub async fn init_db(state: &AppState) -> AppResult<ApiResponse<InitDbData>> {
    tracing::warn!("resetting database schema");
    let tables_created = reset_schema(&state.orm).await?;
    tracing::info!(tables = ?tables_created, "database schema recreated");

    Ok(ApiResponse::success(
        "Database initialized successfully",
        InitDbData { tables_created },
        Some(Meta::empty()),
    ))
}

async fn database_status(orm: &OrmConn) -> Result<(), String> {
    orm.ping().await.map_err(|err| {
        tracing::warn!(error = %err, "database ping failed");
        format!("error: {err}")
    })
}

/// Row counts of the data `clear_trading_data` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingDataCounts {
    pub inventory: u64,
    pub orders: u64,
}

impl TradingDataCounts {
    pub fn is_empty(&self) -> bool {
        self.inventory == 0 && self.orders == 0
    }
}

pub async fn trading_data_counts(orm: &OrmConn) -> AppResult<TradingDataCounts> {
    Ok(TradingDataCounts {
        inventory: Inventory::find().count(orm).await?,
        orders: Orders::find().count(orm).await?,
    })
}

/// Deletes every inventory record and order. Users and customers are kept.
pub async fn clear_trading_data(orm: &OrmConn) -> AppResult<TradingDataCounts> {
    let txn = orm.begin().await?;
    let orders = Orders::delete_many().exec(&txn).await?.rows_affected;
    let inventory = Inventory::delete_many().exec(&txn).await?.rows_affected;
    txn.commit().await?;

    tracing::info!(inventory, orders, "trading data cleared");
    Ok(TradingDataCounts { inventory, orders })
}

const SAMPLE_ADDRESS: &str = "Mwea Town, Kirinyaga County";
const SAMPLE_BAGS: i64 = 10;

const SAMPLE_CUSTOMERS: [(&str, &str, &str, CustomerType); 4] = [
    ("Davana Hotel", "+254700123456", "info@davanahotel.com", CustomerType::Restaurant),
    ("La Enzi Club", "+254700654321", "contact@laenziclub.com", CustomerType::Restaurant),
    ("John Doe", "+254700111111", "john.doe@email.com", CustomerType::Individual),
    ("Jane Smith", "+254700222222", "jane.smith@email.com", CustomerType::Individual),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub customers_added: usize,
    pub bags_added: i64,
}

/// Gives `owner_id` the sample customers and a starting stock of 10 bags.
/// Each part is skipped when the table already has rows.
pub async fn seed_sample_data(orm: &OrmConn, owner_id: i32) -> AppResult<SeedOutcome> {
    let mut outcome = SeedOutcome::default();
    let txn = orm.begin().await?;

    if Customers::find().count(&txn).await? == 0 {
        for (name, phone, email, kind) in SAMPLE_CUSTOMERS {
            customers::ActiveModel {
                id: NotSet,
                user_id: Set(owner_id),
                name: Set(name.to_string()),
                phone: Set(phone.to_string()),
                email: Set(Some(email.to_string())),
                customer_type: Set(kind.as_str().to_string()),
                address: Set(Some(SAMPLE_ADDRESS.to_string())),
                created_at: Set(eat_now()),
            }
            .insert(&txn)
            .await?;
            outcome.customers_added += 1;
        }
    }

    if Inventory::find().count(&txn).await? == 0 {
        inventory::ActiveModel {
            id: NotSet,
            user_id: Set(owner_id),
            bags_added: Set(SAMPLE_BAGS),
            total_kg: Set(bags_to_kg(SAMPLE_BAGS)?),
            cost_per_bag: Set(DEFAULT_COST_PER_BAG),
            date_added: Set(eat_now()),
        }
        .insert(&txn)
        .await?;
        outcome.bags_added = SAMPLE_BAGS;
    }

    txn.commit().await?;
    tracing::info!(
        owner_id,
        customers = outcome.customers_added,
        bags = outcome.bags_added,
        "sample data seeded"
    );
    Ok(outcome)
}
