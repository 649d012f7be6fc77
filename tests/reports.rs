mod common;

use chrono::Duration;
use rice_trade_api::{
    clock::eat_now,
    domain::ReportPeriod,
    entity::{Orders, orders},
    routes::params::ReportScope,
    services::{report_service, system_service},
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use common::{add_bags, customer, order, set_status, signup, test_state};

#[tokio::test]
async fn sales_report_covers_delivered_orders_in_the_window() -> anyhow::Result<()> {
    let state = test_state().await?;
    let user = signup(&state, "trader").await?;
    add_bags(&state, &user, 10).await?;

    let hotel = customer(&state, &user, "Davana Hotel", "restaurant").await?;
    let walk_in = customer(&state, &user, "John Doe", "individual").await?;

    let big = order(&state, &user, hotel.id, 100.0).await?;
    let small = order(&state, &user, walk_in.id, 50.0).await?;
    order(&state, &user, walk_in.id, 20.0).await?; // stays pending
    let old = order(&state, &user, walk_in.id, 10.0).await?;
    for id in [big.id, small.id, old.id] {
        set_status(&state, &user, id, "delivered").await?;
    }

    // Push one delivered order outside the 30 day window.
    let model = Orders::find_by_id(old.id)
        .one(&state.orm)
        .await?
        .expect("order row");
    let mut active: orders::ActiveModel = model.into();
    active.order_date = Set(eat_now() - Duration::days(40));
    active.update(&state.orm).await?;

    let report = report_service::sales_report(&state, &user, ReportPeriod::Month)
        .await?
        .data
        .expect("report");
    assert_eq!(report.period, ReportPeriod::Month);
    assert!(report.start_date.is_some());
    let s = report.summary;
    assert_eq!(s.total_orders, 2);
    assert_eq!(s.total_kg_sold, 150);
    assert_eq!(s.total_revenue, 28_000);
    assert_eq!(s.total_cost, 22_500);
    assert_eq!(s.profit, 5_500);
    assert_eq!((s.restaurant_orders, s.restaurant_revenue), (1, 18_000));
    assert_eq!((s.individual_orders, s.individual_revenue), (1, 10_000));

    let all = report_service::sales_report(&state, &user, ReportPeriod::All)
        .await?
        .data
        .expect("report");
    assert!(all.start_date.is_none());
    assert_eq!(all.summary.total_orders, 3);
    assert_eq!(all.summary.total_revenue, 30_000);

    Ok(())
}

#[tokio::test]
async fn sales_report_is_limited_to_the_caller() -> anyhow::Result<()> {
    let state = test_state().await?;
    let seller = signup(&state, "seller").await?;
    let other = signup(&state, "other").await?;
    add_bags(&state, &seller, 1).await?;

    let buyer = customer(&state, &seller, "Jane Smith", "individual").await?;
    let sold = order(&state, &seller, buyer.id, 30.0).await?;
    set_status(&state, &seller, sold.id, "delivered").await?;

    let report = report_service::sales_report(&state, &other, ReportPeriod::Week)
        .await?
        .data
        .expect("report");
    assert_eq!(report.summary.total_orders, 0);
    assert_eq!(report.summary.profit, 0);

    Ok(())
}

#[tokio::test]
async fn inventory_report_scopes() -> anyhow::Result<()> {
    let state = test_state().await?;
    let first = signup(&state, "first").await?;
    let second = signup(&state, "second").await?;
    add_bags(&state, &first, 10).await?;
    add_bags(&state, &second, 2).await?;

    let a = customer(&state, &first, "Davana Hotel", "restaurant").await?;
    let b = customer(&state, &second, "John Doe", "individual").await?;
    let sold_a = order(&state, &first, a.id, 100.0).await?;
    let sold_b = order(&state, &second, b.id, 10.0).await?;
    set_status(&state, &first, sold_a.id, "delivered").await?;
    set_status(&state, &second, sold_b.id, "delivered").await?;

    let everyone = report_service::inventory_report(&state, &first, ReportScope::All)
        .await?
        .data
        .expect("report");
    assert_eq!(everyone.scope, "all");
    assert_eq!(everyone.inventory_records.len(), 2);
    let s = everyone.summary;
    assert_eq!(s.total_bags_purchased, 12);
    assert_eq!(s.total_kg_purchased, 720);
    assert_eq!(s.total_purchase_cost, 108_000);
    assert_eq!(s.sold_kg, 110);
    assert_eq!(s.sold_revenue, 20_000);
    assert_eq!(s.available_kg, 610);
    assert_eq!(s.cost_of_sold, 16_500);
    assert_eq!(s.profit, 3_500);

    let mine = report_service::inventory_report(&state, &first, ReportScope::Mine)
        .await?
        .data
        .expect("report");
    assert_eq!(mine.scope, "mine");
    assert_eq!(mine.inventory_records.len(), 1);
    assert_eq!(mine.summary.total_kg_purchased, 600);
    assert_eq!(mine.summary.sold_kg, 100);
    assert_eq!(mine.summary.available_kg, 500);

    Ok(())
}

#[tokio::test]
async fn cleanup_clears_stock_and_orders_but_keeps_customers() -> anyhow::Result<()> {
    let state = test_state().await?;
    let owner = signup(&state, "owner").await?;

    let seeded = system_service::seed_sample_data(&state.orm, owner.user_id).await?;
    assert_eq!(seeded.customers_added, 4);
    assert_eq!(seeded.bags_added, 10);
    // Seeding twice adds nothing.
    let again = system_service::seed_sample_data(&state.orm, owner.user_id).await?;
    assert_eq!(again, system_service::SeedOutcome::default());

    let buyer = customer(&state, &owner, "Walk-in", "individual").await?;
    order(&state, &owner, buyer.id, 5.0).await?;

    let before = system_service::trading_data_counts(&state.orm).await?;
    assert_eq!((before.inventory, before.orders), (1, 1));

    let removed = system_service::clear_trading_data(&state.orm).await?;
    assert_eq!(removed, before);
    assert!(system_service::trading_data_counts(&state.orm).await?.is_empty());

    let customers = rice_trade_api::services::customer_service::list_customers(&state, &owner, None)
        .await?
        .data
        .expect("customers");
    assert_eq!(customers.items.len(), 5);

    Ok(())
}
