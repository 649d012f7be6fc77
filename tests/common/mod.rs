#![allow(dead_code)]

use rice_trade_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        auth::SignupRequest,
        customers::CreateCustomerRequest,
        inventory::AddInventoryRequest,
        orders::{CreateOrderRequest, UpdateOrderStatusRequest},
    },
    middleware::auth::AuthUser,
    models::{Customer, Order},
    services::{auth_service, customer_service, inventory_service, order_service},
    state::AppState,
};

pub const PASSWORD: &str = "Passw0rd!";

/// Fresh in-memory database with the schema applied.
pub async fn test_state() -> anyhow::Result<AppState> {
    let config = AppConfig::for_tests();
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, config))
}

pub async fn signup(state: &AppState, username: &str) -> anyhow::Result<AuthUser> {
    let resp = auth_service::signup(
        state,
        SignupRequest {
            username: username.into(),
            email: format!("{username}@example.com"),
            phone: "+254700000000".into(),
            password: PASSWORD.into(),
            confirm_password: PASSWORD.into(),
        },
    )
    .await?;
    let user = resp.data.expect("user data");
    Ok(AuthUser { user_id: user.id })
}

/// Returns the id of the new inventory record.
pub async fn add_bags(state: &AppState, user: &AuthUser, bags: i64) -> anyhow::Result<i32> {
    let resp = inventory_service::add_inventory(
        state,
        user,
        AddInventoryRequest {
            bags,
            cost_per_bag: None,
        },
    )
    .await?;
    Ok(resp.data.expect("inventory record").id)
}

pub async fn customer(
    state: &AppState,
    user: &AuthUser,
    name: &str,
    kind: &str,
) -> anyhow::Result<Customer> {
    let resp = customer_service::create_customer(
        state,
        user,
        CreateCustomerRequest {
            name: name.into(),
            phone: "+254711111111".into(),
            customer_type: Some(kind.into()),
            ..Default::default()
        },
    )
    .await?;
    Ok(resp.data.expect("customer data"))
}

pub async fn order(
    state: &AppState,
    user: &AuthUser,
    customer_id: i32,
    quantity_kg: f64,
) -> anyhow::Result<Order> {
    let resp = order_service::create_order(
        state,
        user,
        CreateOrderRequest {
            customer_id: Some(customer_id),
            quantity_kg,
        },
    )
    .await?;
    Ok(resp.data.expect("order data"))
}

pub async fn set_status(
    state: &AppState,
    user: &AuthUser,
    order_id: i32,
    status: &str,
) -> anyhow::Result<Order> {
    let resp = order_service::update_order_status(
        state,
        user,
        order_id,
        UpdateOrderStatusRequest {
            status: status.into(),
        },
    )
    .await?;
    Ok(resp.data.expect("order data"))
}

pub async fn available_kg(state: &AppState, user: &AuthUser) -> anyhow::Result<i64> {
    let resp = inventory_service::get_inventory(state, user).await?;
    Ok(resp.data.expect("inventory data").available_kg)
}
