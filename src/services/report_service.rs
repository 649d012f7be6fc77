use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::{
    clock::eat_now,
    domain::{
        DeliveryStatus, ReportPeriod,
        report::{Purchase, SaleLine, summarize_inventory, summarize_sales},
    },
    dto::reports::{InventoryReport, SalesReport},
    entity::{
        customers::Entity as Customers,
        inventory::{Column as InvCol, Entity as Inventory},
        orders::{Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    routes::params::ReportScope,
    services::{customer_service::customer_type_of, inventory_service::inventory_from_entity},
    state::AppState,
};

/// Revenue, cost and profit over the caller's delivered orders placed inside `period`.
pub async fn sales_report(
    state: &AppState,
    user: &AuthUser,
    period: ReportPeriod,
) -> AppResult<ApiResponse<SalesReport>> {
    let end_date = eat_now();
    let start_date = period.start(end_date);

    let mut condition = Condition::all()
        .add(OrderCol::UserId.eq(user.user_id))
        .add(OrderCol::DeliveryStatus.eq(DeliveryStatus::Delivered.as_str()))
        .add(OrderCol::OrderDate.lte(end_date));
    if let Some(start) = start_date {
        condition = condition.add(OrderCol::OrderDate.gte(start));
    }

    let rows = Orders::find()
        .filter(condition)
        .find_also_related(Customers)
        .all(&state.orm)
        .await?;

    let mut lines = Vec::with_capacity(rows.len());
    for (order, customer) in rows {
        let customer = customer.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("order {} has no customer", order.id))
        })?;
        lines.push(SaleLine {
            customer_type: customer_type_of(&customer)?,
            quantity_kg: order.quantity_kg,
            total_amount: order.total_amount,
        });
    }

    let report = SalesReport {
        period,
        start_date,
        end_date,
        summary: summarize_sales(lines),
    };

    Ok(ApiResponse::success("Sales report", report, Some(Meta::empty())))
}

/// Purchases netted against delivered sales.
///
/// With [`ReportScope::All`] this aggregates every user's inventory and orders, unlike the
/// per-user stock endpoints. [`ReportScope::Mine`] restricts it to the caller.
pub async fn inventory_report(
    state: &AppState,
    user: &AuthUser,
    scope: ReportScope,
) -> AppResult<ApiResponse<InventoryReport>> {
    let mut inventory_filter = Condition::all();
    let mut order_filter = Condition::all()
        .add(OrderCol::DeliveryStatus.eq(DeliveryStatus::Delivered.as_str()));
    if scope == ReportScope::Mine {
        inventory_filter = inventory_filter.add(InvCol::UserId.eq(user.user_id));
        order_filter = order_filter.add(OrderCol::UserId.eq(user.user_id));
    }

    let records = Inventory::find()
        .filter(inventory_filter)
        .order_by_desc(InvCol::DateAdded)
        .order_by_desc(InvCol::Id)
        .all(&state.orm)
        .await?;

    let delivered: Vec<(i64, i64)> = Orders::find()
        .select_only()
        .column(OrderCol::QuantityKg)
        .column(OrderCol::TotalAmount)
        .filter(order_filter)
        .into_tuple()
        .all(&state.orm)
        .await?;

    let summary = summarize_inventory(
        records.iter().map(|r| Purchase {
            bags_added: r.bags_added,
            total_kg: r.total_kg,
            cost_per_bag: r.cost_per_bag,
        }),
        delivered,
    );

    let report = InventoryReport {
        scope: scope.as_str().to_string(),
        summary,
        inventory_records: records.into_iter().map(inventory_from_entity).collect(),
    };

    Ok(ApiResponse::success("Inventory report", report, Some(Meta::empty())))
}
