use clap::Parser;
use rice_trade_api::{
    config::AppConfig,
    db::{create_orm_conn, reset_schema, run_migrations},
};

#[derive(Parser)]
#[command(name = "migrate")]
#[command(about = "Apply database migrations for the rice trade API")]
struct Cli {
    /// Drop every table and recreate the schema. All data is lost.
    #[arg(long)]
    fresh: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;

    if cli.fresh {
        let tables = reset_schema(&orm).await?;
        println!("Schema recreated: {}", tables.join(", "));
    } else {
        run_migrations(&orm).await?;
        println!("Migrations applied");
    }
    Ok(())
}
