use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use rice_trade_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{Users, users},
    services::{
        auth_service::{DEFAULT_ADMIN_USERNAME, ensure_default_admin},
        system_service::seed_sample_data,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    if let Some(id) = ensure_default_admin(&orm).await? {
        println!("Created default admin (id={id})");
    }

    // Sample data belongs to the admin, or to the oldest account if it was renamed.
    let owner = match Users::find()
        .filter(users::Column::Username.eq(DEFAULT_ADMIN_USERNAME))
        .one(&orm)
        .await?
    {
        Some(user) => user,
        None => Users::find()
            .order_by_asc(users::Column::Id)
            .one(&orm)
            .await?
            .ok_or_else(|| anyhow::anyhow!("no user to own the sample data"))?,
    };

    let outcome = seed_sample_data(&orm, owner.id).await?;
    println!(
        "Seed completed for {}: {} customers, {} bags",
        owner.username, outcome.customers_added, outcome.bags_added
    );
    Ok(())
}
