use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    clock::eat_now,
    domain::{DeliveryStatus, ReportPeriod, validate_order_quantity},
    dto::orders::{CreateOrderRequest, OrderList, UpdateOrderRequest, UpdateOrderStatusRequest},
    entity::{
        customers::{Entity as Customers, Model as CustomerModel},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Order,
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    services::{
        customer_service::{customer_type_of, find_owned as find_owned_customer},
        inventory_service::available_stock,
    },
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let mut condition = Condition::all().add(OrderCol::UserId.eq(user.user_id));
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        let status: DeliveryStatus = status.parse()?;
        condition = condition.add(OrderCol::DeliveryStatus.eq(status.as_str()));
    }
    if let Some(customer_id) = query.customer_id {
        condition = condition.add(OrderCol::CustomerId.eq(customer_id));
    }
    let period = query.period.unwrap_or(ReportPeriod::All);
    if let Some(start) = period.start(eat_now()) {
        condition = condition.add(OrderCol::OrderDate.gte(start));
    }

    let items = Orders::find()
        .filter(condition)
        .order_by_desc(OrderCol::OrderDate)
        .order_by_desc(OrderCol::Id)
        .find_also_related(Customers)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(order, customer)| order_from_entity(order, customer.as_ref()))
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let quantity_kg = validate_order_quantity(payload.quantity_kg)?;
    let customer_id = payload
        .customer_id
        .ok_or_else(|| AppError::BadRequest("customer_id is required".into()))?;

    let txn = state.orm.begin().await?;

    let customer = find_owned_customer(&txn, user.user_id, customer_id).await?;
    let customer_type = customer_type_of(&customer)?;

    // Pending orders do not reserve stock; the check is against delivered sales only.
    available_stock(&txn, user.user_id)
        .await?
        .ensure_available(quantity_kg)?;

    let order = OrderActive {
        id: NotSet,
        user_id: Set(user.user_id),
        customer_id: Set(customer.id),
        quantity_kg: Set(quantity_kg),
        price_per_kg: Set(customer_type.price_per_kg()),
        total_amount: Set(customer_type.total_for(quantity_kg)?),
        order_date: Set(eat_now()),
        delivery_status: Set(DeliveryStatus::Pending.as_str().to_string()),
        delivery_date: Set(None),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        user_id = user.user_id,
        order_id = order.id,
        customer_id = customer.id,
        quantity_kg,
        total_amount = order.total_amount,
        "order created"
    );

    Ok(ApiResponse::success(
        "Order created successfully",
        order_from_entity(order, Some(&customer))?,
        Some(Meta::empty()),
    ))
}

pub async fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let txn = state.orm.begin().await?;

    let existing = find_owned(&txn, user.user_id, id).await?;
    status_of(&existing)?.ensure_editable()?;

    let quantity_kg =
        validate_order_quantity(payload.quantity_kg.unwrap_or(existing.quantity_kg as f64))?;
    let customer_id = payload.customer_id.unwrap_or(existing.customer_id);

    let customer = find_owned_customer(&txn, user.user_id, customer_id).await?;
    let customer_type = customer_type_of(&customer)?;

    available_stock(&txn, user.user_id)
        .await?
        .ensure_available(quantity_kg)?;

    let mut active: OrderActive = existing.into();
    active.customer_id = Set(customer.id);
    active.quantity_kg = Set(quantity_kg);
    active.price_per_kg = Set(customer_type.price_per_kg());
    active.total_amount = Set(customer_type.total_for(quantity_kg)?);
    let order = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        user_id = user.user_id,
        order_id = id,
        quantity_kg,
        total_amount = order.total_amount,
        "order updated"
    );

    Ok(ApiResponse::success(
        "Order updated successfully",
        order_from_entity(order, Some(&customer))?,
        Some(Meta::empty()),
    ))
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let next: DeliveryStatus = payload.status.parse()?;

    let txn = state.orm.begin().await?;

    let existing = find_owned(&txn, user.user_id, id).await?;
    let next = status_of(&existing)?.transition(next)?;

    if next == DeliveryStatus::Delivered {
        available_stock(&txn, user.user_id)
            .await?
            .ensure_available(existing.quantity_kg)?;
    }

    let mut active: OrderActive = existing.into();
    active.delivery_status = Set(next.as_str().to_string());
    if next == DeliveryStatus::Delivered {
        active.delivery_date = Set(Some(eat_now()));
    }
    let order = active.update(&txn).await?;

    let customer = Customers::find_by_id(order.customer_id).one(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        user_id = user.user_id,
        order_id = id,
        status = %next,
        "order status updated"
    );

    Ok(ApiResponse::success(
        "Order status updated successfully",
        order_from_entity(order, customer.as_ref())?,
        Some(Meta::empty()),
    ))
}

async fn find_owned<C: ConnectionTrait>(conn: &C, user_id: i32, id: i32) -> AppResult<OrderModel> {
    Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::Id.eq(id))
                .add(OrderCol::UserId.eq(user_id)),
        )
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("Order"))
}

pub(crate) fn status_of(model: &OrderModel) -> AppResult<DeliveryStatus> {
    model.delivery_status.parse().map_err(|_| {
        AppError::Internal(anyhow::anyhow!(
            "order {} has invalid status {:?}",
            model.id,
            model.delivery_status
        ))
    })
}

fn order_from_entity(model: OrderModel, customer: Option<&CustomerModel>) -> AppResult<Order> {
    let delivery_status = status_of(&model)?;
    Ok(Order {
        id: model.id,
        customer_id: model.customer_id,
        customer_name: customer.map(|c| c.name.clone()).unwrap_or_default(),
        quantity_kg: model.quantity_kg,
        price_per_kg: model.price_per_kg,
        total_amount: model.total_amount,
        order_date: model.order_date,
        delivery_status,
        delivery_date: model.delivery_date,
    })
}
