mod common;

use rice_trade_api::{
    dto::inventory::{AddInventoryRequest, UpdateInventoryRequest},
    error::AppError,
    services::inventory_service,
};

use common::{add_bags, available_kg, customer, order, set_status, signup, test_state};

#[tokio::test]
async fn absurd_bag_counts_are_rejected_without_touching_stock() -> anyhow::Result<()> {
    let state = test_state().await?;
    let user = signup(&state, "trader").await?;
    let record = add_bags(&state, &user, 2).await?;

    for bags in [i64::MAX, 100_001] {
        let err = inventory_service::add_inventory(
            &state,
            &user,
            AddInventoryRequest {
                bags,
                cost_per_bag: None,
            },
        )
        .await
        .expect_err("too many bags");
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Number of bags cannot exceed 100000 per record");
    }

    let err = inventory_service::update_inventory(
        &state,
        &user,
        record,
        UpdateInventoryRequest {
            bags: Some(i64::MAX),
            cost_per_bag: None,
        },
    )
    .await
    .expect_err("too many bags");
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = inventory_service::add_inventory(
        &state,
        &user,
        AddInventoryRequest {
            bags: 1,
            cost_per_bag: Some(i64::MAX),
        },
    )
    .await
    .expect_err("cost out of range");
    assert!(matches!(err, AppError::BadRequest(_)));

    assert_eq!(available_kg(&state, &user).await?, 120);
    Ok(())
}

#[tokio::test]
async fn records_cannot_shrink_below_delivered_stock() -> anyhow::Result<()> {
    let state = test_state().await?;
    let user = signup(&state, "trader").await?;
    let record = add_bags(&state, &user, 10).await?;
    let buyer = customer(&state, &user, "Davana Hotel", "restaurant").await?;

    let sale = order(&state, &user, buyer.id, 300.0).await?;
    set_status(&state, &user, sale.id, "delivered").await?;
    assert_eq!(available_kg(&state, &user).await?, 300);

    let err = inventory_service::update_inventory(
        &state,
        &user,
        record,
        UpdateInventoryRequest {
            bags: Some(1),
            cost_per_bag: None,
        },
    )
    .await
    .expect_err("would leave negative stock");
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(
        err.to_string(),
        "Inventory cannot drop below the 300kg already delivered"
    );
    assert_eq!(available_kg(&state, &user).await?, 300);

    // Five bags still cover the delivery exactly.
    let updated = inventory_service::update_inventory(
        &state,
        &user,
        record,
        UpdateInventoryRequest {
            bags: Some(5),
            cost_per_bag: None,
        },
    )
    .await?
    .data
    .expect("inventory record");
    assert_eq!(updated.total_kg, 300);
    assert_eq!(available_kg(&state, &user).await?, 0);

    Ok(())
}
