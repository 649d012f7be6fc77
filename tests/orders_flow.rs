mod common;

use rice_trade_api::{
    domain::DeliveryStatus,
    dto::orders::{CreateOrderRequest, UpdateOrderRequest},
    error::AppError,
    routes::params::OrderListQuery,
    services::{inventory_service, order_service},
};

use common::{add_bags, available_kg, customer, order, set_status, signup, test_state};

// Stock moves only when an order is delivered; pending and cancelled orders leave it alone.
#[tokio::test]
async fn delivery_consumes_stock_and_closes_the_order() -> anyhow::Result<()> {
    let state = test_state().await?;
    let user = signup(&state, "trader").await?;

    add_bags(&state, &user, 10).await?;
    assert_eq!(available_kg(&state, &user).await?, 600);

    let buyer = customer(&state, &user, "John Doe", "individual").await?;
    let created = order(&state, &user, buyer.id, 50.0).await?;
    assert_eq!(created.delivery_status, DeliveryStatus::Pending);
    assert_eq!(created.price_per_kg, 200);
    assert_eq!(created.total_amount, 10_000);
    assert_eq!(created.customer_name, "John Doe");
    assert!(created.delivery_date.is_none());
    assert_eq!(available_kg(&state, &user).await?, 600);

    let delivered = set_status(&state, &user, created.id, "delivered").await?;
    assert_eq!(delivered.delivery_status, DeliveryStatus::Delivered);
    assert!(delivered.delivery_date.is_some());

    let stock = inventory_service::get_inventory(&state, &user)
        .await?
        .data
        .expect("inventory data");
    assert_eq!(stock.available_kg, 550);
    assert_eq!(stock.total_sold_kg, 50);
    assert_eq!(stock.total_bags_added, 10);
    assert_eq!(stock.available_bags, 9.17);

    let err = set_status(&state, &user, created.id, "cancelled")
        .await
        .expect_err("delivered orders are final")
        .downcast::<AppError>()?;
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = order_service::update_order(
        &state,
        &user,
        created.id,
        UpdateOrderRequest {
            quantity_kg: Some(60.0),
            ..Default::default()
        },
    )
    .await
    .expect_err("delivered orders cannot be edited");
    assert_eq!(err.to_string(), "Only pending orders can be edited");

    Ok(())
}

#[tokio::test]
async fn restaurant_pricing_and_pending_edits() -> anyhow::Result<()> {
    let state = test_state().await?;
    let user = signup(&state, "trader").await?;
    add_bags(&state, &user, 5).await?;

    let hotel = customer(&state, &user, "Davana Hotel", "restaurant").await?;
    let walk_in = customer(&state, &user, "Jane Smith", "individual").await?;

    let created = order(&state, &user, hotel.id, 100.0).await?;
    assert_eq!(created.price_per_kg, 180);
    assert_eq!(created.total_amount, 18_000);

    // Moving the order to an individual reprices it.
    let updated = order_service::update_order(
        &state,
        &user,
        created.id,
        UpdateOrderRequest {
            customer_id: Some(walk_in.id),
            quantity_kg: Some(25.0),
        },
    )
    .await?
    .data
    .expect("order data");
    assert_eq!(updated.customer_id, walk_in.id);
    assert_eq!(updated.quantity_kg, 25);
    assert_eq!(updated.total_amount, 5_000);

    let cancelled = set_status(&state, &user, created.id, "cancelled").await?;
    assert_eq!(cancelled.delivery_status, DeliveryStatus::Cancelled);
    assert!(cancelled.delivery_date.is_none());
    assert_eq!(available_kg(&state, &user).await?, 300);

    Ok(())
}

#[tokio::test]
async fn orders_are_validated_against_quantity_rules_and_stock() -> anyhow::Result<()> {
    let state = test_state().await?;
    let user = signup(&state, "trader").await?;
    add_bags(&state, &user, 1).await?;
    let buyer = customer(&state, &user, "John Doe", "individual").await?;

    for bad in [0.0, 3.0, 7.0, 12.5, -5.0] {
        let err = order(&state, &user, buyer.id, bad)
            .await
            .expect_err("invalid quantity");
        assert_eq!(
            err.to_string(),
            "Quantity must be at least 5kg and in multiples of 5kg"
        );
    }

    let err = order(&state, &user, buyer.id, 65.0)
        .await
        .expect_err("more than the 60kg in stock");
    assert!(err.to_string().starts_with("Insufficient inventory"));

    let err = order_service::create_order(
        &state,
        &user,
        CreateOrderRequest {
            customer_id: None,
            quantity_kg: 5.0,
        },
    )
    .await
    .expect_err("customer is required");
    assert!(matches!(err, AppError::BadRequest(_)));

    // Exactly the available stock is fine.
    order(&state, &user, buyer.id, 60.0).await?;

    Ok(())
}

#[tokio::test]
async fn delivering_rechecks_stock() -> anyhow::Result<()> {
    let state = test_state().await?;
    let user = signup(&state, "trader").await?;
    add_bags(&state, &user, 1).await?;
    let buyer = customer(&state, &user, "John Doe", "individual").await?;

    // Both fit on their own while pending.
    let first = order(&state, &user, buyer.id, 40.0).await?;
    let second = order(&state, &user, buyer.id, 40.0).await?;

    set_status(&state, &user, first.id, "delivered").await?;
    let err = set_status(&state, &user, second.id, "delivered")
        .await
        .expect_err("only 20kg left");
    assert!(err.to_string().starts_with("Insufficient inventory"));

    let err = set_status(&state, &user, second.id, "shipped")
        .await
        .expect_err("unknown status");
    assert_eq!(err.to_string(), "Invalid status");

    Ok(())
}

#[tokio::test]
async fn orders_are_private_to_their_owner() -> anyhow::Result<()> {
    let state = test_state().await?;
    let owner = signup(&state, "owner").await?;
    let other = signup(&state, "other").await?;
    add_bags(&state, &owner, 2).await?;
    add_bags(&state, &other, 2).await?;

    let buyer = customer(&state, &owner, "La Enzi Club", "restaurant").await?;
    let created = order(&state, &owner, buyer.id, 10.0).await?;

    let err = set_status(&state, &other, created.id, "delivered")
        .await
        .expect_err("foreign order")
        .downcast::<AppError>()?;
    assert!(matches!(err, AppError::NotFound("Order")));

    let err = order(&state, &other, buyer.id, 10.0)
        .await
        .expect_err("foreign customer")
        .downcast::<AppError>()?;
    assert!(matches!(err, AppError::NotFound("Customer")));

    let theirs = order_service::list_orders(&state, &other, OrderListQuery::default())
        .await?
        .meta
        .and_then(|m| m.total);
    assert_eq!(theirs, Some(0));

    let pending = order_service::list_orders(
        &state,
        &owner,
        OrderListQuery {
            status: Some("pending".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("orders");
    assert_eq!(pending.items.len(), 1);
    assert_eq!(pending.items[0].id, created.id);

    Ok(())
}
