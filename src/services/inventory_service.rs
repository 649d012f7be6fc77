use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    clock::{display_date, eat_now},
    domain::{
        DEFAULT_COST_PER_BAG, DeliveryStatus, ReportPeriod, StockLevel,
        stock::{bags_to_kg, validate_bags, validate_cost_per_bag},
    },
    dto::inventory::{AddInventoryRequest, InventoryHistory, InventoryStatus, UpdateInventoryRequest},
    entity::{
        inventory::{ActiveModel as InventoryActive, Column as InvCol, Entity as Inventory, Model as InventoryModel},
        orders::{Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::InventoryRecord,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Stock position for one user: everything they added minus their delivered orders.
///
/// Generic over the connection so callers can evaluate it inside a transaction.
pub async fn available_stock<C: ConnectionTrait>(conn: &C, user_id: i32) -> AppResult<StockLevel> {
    let added: Vec<(i64, i64)> = Inventory::find()
        .select_only()
        .column(InvCol::BagsAdded)
        .column(InvCol::TotalKg)
        .filter(InvCol::UserId.eq(user_id))
        .into_tuple()
        .all(conn)
        .await?;

    let delivered: Vec<i64> = Orders::find()
        .select_only()
        .column(OrderCol::QuantityKg)
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user_id))
                .add(OrderCol::DeliveryStatus.eq(DeliveryStatus::Delivered.as_str())),
        )
        .into_tuple()
        .all(conn)
        .await?;

    Ok(StockLevel::tally(added, delivered))
}

pub async fn get_inventory(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<InventoryStatus>> {
    let level = available_stock(&state.orm, user.user_id).await?;
    Ok(ApiResponse::success(
        "Inventory",
        InventoryStatus::from(level),
        Some(Meta::empty()),
    ))
}

pub async fn inventory_history(
    state: &AppState,
    user: &AuthUser,
    period: ReportPeriod,
) -> AppResult<ApiResponse<InventoryHistory>> {
    let mut condition = Condition::all().add(InvCol::UserId.eq(user.user_id));
    if let Some(start) = period.start(eat_now()) {
        condition = condition.add(InvCol::DateAdded.gte(start));
    }

    let items: Vec<InventoryRecord> = Inventory::find()
        .filter(condition)
        .order_by_desc(InvCol::DateAdded)
        .order_by_desc(InvCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(inventory_from_entity)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success(
        "Inventory history",
        InventoryHistory { items },
        Some(meta),
    ))
}

pub async fn add_inventory(
    state: &AppState,
    user: &AuthUser,
    payload: AddInventoryRequest,
) -> AppResult<ApiResponse<InventoryRecord>> {
    let bags = validate_bags(payload.bags)?;
    let cost_per_bag = validate_cost_per_bag(payload.cost_per_bag.unwrap_or(DEFAULT_COST_PER_BAG))?;
    let total_kg = bags_to_kg(bags)?;

    let record = InventoryActive {
        id: NotSet,
        user_id: Set(user.user_id),
        bags_added: Set(bags),
        total_kg: Set(total_kg),
        cost_per_bag: Set(cost_per_bag),
        date_added: Set(eat_now()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        user_id = user.user_id,
        inventory_id = record.id,
        bags,
        total_kg,
        "inventory added"
    );

    Ok(ApiResponse::success(
        format!("Added {bags} bags ({total_kg}kg) to inventory"),
        inventory_from_entity(record),
        Some(Meta::empty()),
    ))
}

pub async fn update_inventory(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateInventoryRequest,
) -> AppResult<ApiResponse<InventoryRecord>> {
    let txn = state.orm.begin().await?;

    let existing = Inventory::find()
        .filter(
            Condition::all()
                .add(InvCol::Id.eq(id))
                .add(InvCol::UserId.eq(user.user_id)),
        )
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("Inventory record"))?;

    let bags = validate_bags(payload.bags.unwrap_or(existing.bags_added))?;
    let cost_per_bag = validate_cost_per_bag(payload.cost_per_bag.unwrap_or(existing.cost_per_bag))?;
    let total_kg = bags_to_kg(bags)?;

    let mut active: InventoryActive = existing.into();
    active.bags_added = Set(bags);
    active.total_kg = Set(total_kg);
    active.cost_per_bag = Set(cost_per_bag);
    let record = active.update(&txn).await?;

    // Shrinking a record must still cover what has already been delivered.
    available_stock(&txn, user.user_id)
        .await?
        .ensure_covers_deliveries()?;

    txn.commit().await?;

    tracing::info!(user_id = user.user_id, inventory_id = id, bags, "inventory updated");

    Ok(ApiResponse::success(
        format!("Updated inventory record: {bags} bags ({total_kg}kg)"),
        inventory_from_entity(record),
        Some(Meta::empty()),
    ))
}

pub(crate) fn inventory_from_entity(model: InventoryModel) -> InventoryRecord {
    InventoryRecord {
        id: model.id,
        bags_added: model.bags_added,
        total_kg: model.total_kg,
        cost_per_bag: model.cost_per_bag,
        formatted_date: display_date(&model.date_added),
        date_added: model.date_added,
    }
}
