use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    clock::eat_now,
    domain::CustomerType,
    dto::customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
    entity::{
        customers::{ActiveModel as CustomerActive, Column as CustomerCol, Entity as Customers, Model as CustomerModel},
        orders::{Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Customer,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_customers(
    state: &AppState,
    user: &AuthUser,
    customer_type: Option<String>,
) -> AppResult<ApiResponse<CustomerList>> {
    let mut condition = Condition::all().add(CustomerCol::UserId.eq(user.user_id));
    if let Some(kind) = customer_type.as_ref().filter(|s| !s.is_empty()) {
        let kind: CustomerType = kind.parse()?;
        condition = condition.add(CustomerCol::CustomerType.eq(kind.as_str()));
    }

    let items = Customers::find()
        .filter(condition)
        .order_by_desc(CustomerCol::CreatedAt)
        .order_by_desc(CustomerCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(customer_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Customers", CustomerList { items }, Some(meta)))
}

pub async fn create_customer(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let name = payload.name.trim().to_string();
    let phone = payload.phone.trim().to_string();
    if name.is_empty() || phone.is_empty() {
        return Err(AppError::BadRequest("Name and phone are required".into()));
    }
    let customer_type = match payload.customer_type.as_deref() {
        Some(raw) => raw.parse::<CustomerType>()?,
        None => CustomerType::Individual,
    };

    let customer = CustomerActive {
        id: NotSet,
        user_id: Set(user.user_id),
        name: Set(name),
        phone: Set(phone),
        email: Set(non_blank(payload.email)),
        customer_type: Set(customer_type.as_str().to_string()),
        address: Set(non_blank(payload.address)),
        created_at: Set(eat_now()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        user_id = user.user_id,
        customer_id = customer.id,
        customer_type = %customer_type,
        "customer created"
    );

    Ok(ApiResponse::success(
        "Customer added successfully",
        customer_from_entity(customer)?,
        Some(Meta::empty()),
    ))
}

pub async fn update_customer(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let existing = find_owned(&state.orm, user.user_id, id).await?;

    let mut active: CustomerActive = existing.into();
    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Name and phone are required".into()));
        }
        active.name = Set(name);
    }
    if let Some(phone) = payload.phone {
        let phone = phone.trim().to_string();
        if phone.is_empty() {
            return Err(AppError::BadRequest("Name and phone are required".into()));
        }
        active.phone = Set(phone);
    }
    if payload.email.is_some() {
        active.email = Set(non_blank(payload.email));
    }
    if let Some(raw) = payload.customer_type {
        let kind: CustomerType = raw.parse()?;
        active.customer_type = Set(kind.as_str().to_string());
    }
    if payload.address.is_some() {
        active.address = Set(non_blank(payload.address));
    }

    let customer = active.update(&state.orm).await?;

    tracing::info!(user_id = user.user_id, customer_id = id, "customer updated");

    Ok(ApiResponse::success(
        "Customer updated successfully",
        customer_from_entity(customer)?,
        Some(Meta::empty()),
    ))
}

pub async fn delete_customer(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;
    let customer = find_owned(&txn, user.user_id, id).await?;

    let order_count = Orders::find()
        .filter(OrderCol::CustomerId.eq(customer.id))
        .count(&txn)
        .await?;
    if order_count > 0 {
        return Err(AppError::Conflict(format!(
            "Customer has {order_count} order(s) and cannot be deleted"
        )));
    }

    Customers::delete_by_id(customer.id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, customer_id = id, "customer deleted");

    Ok(ApiResponse::success(
        "Customer deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Loads a customer that belongs to `user_id`; anyone else's customer is reported as missing.
pub(crate) async fn find_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    id: i32,
) -> AppResult<CustomerModel> {
    Customers::find()
        .filter(
            Condition::all()
                .add(CustomerCol::Id.eq(id))
                .add(CustomerCol::UserId.eq(user_id)),
        )
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("Customer"))
}

/// Stored customer types are validated on write; anything else in the table is corrupt data.
pub(crate) fn customer_type_of(model: &CustomerModel) -> AppResult<CustomerType> {
    model.customer_type.parse().map_err(|_| {
        AppError::Internal(anyhow::anyhow!(
            "customer {} has invalid type {:?}",
            model.id,
            model.customer_type
        ))
    })
}

fn customer_from_entity(model: CustomerModel) -> AppResult<Customer> {
    let customer_type = customer_type_of(&model)?;
    Ok(Customer {
        id: model.id,
        name: model.name,
        phone: model.phone,
        email: model.email,
        customer_type,
        address: model.address,
        created_at: model.created_at,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
