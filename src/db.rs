use anyhow::Result;
use sea_orm::{Database, DatabaseConnection, DbErr, EntityName};
use sea_orm_migration::MigratorTrait;

use crate::{
    entity::{Customers, Inventory, Orders, Users},
    migration::Migrator,
};

pub type OrmConn = DatabaseConnection;

/// Create a SeaORM connection. SQLite URLs (including `sqlite::memory:`) and Postgres URLs
/// are both accepted.
pub async fn create_orm_conn(database_url: &str) -> Result<OrmConn> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Apply any pending migrations.
pub async fn run_migrations(conn: &OrmConn) -> Result<(), DbErr> {
    Migrator::up(conn, None).await
}

/// Drop every table and recreate the schema from scratch. Returns the application tables.
pub async fn reset_schema(conn: &OrmConn) -> Result<Vec<String>, DbErr> {
    Migrator::fresh(conn).await?;
    Ok(table_names())
}

pub fn table_names() -> Vec<String> {
    [
        Users.table_name(),
        Customers.table_name(),
        Inventory.table_name(),
        Orders.table_name(),
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
