use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use rice_trade_api::{
    config::AppConfig,
    db::create_orm_conn,
    services::system_service::{clear_trading_data, trading_data_counts},
};

#[derive(Parser)]
#[command(name = "cleanup")]
#[command(about = "Delete all inventory records and orders. Users and customers are kept.")]
struct Cli {
    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;

    let counts = trading_data_counts(&orm).await?;
    println!("Current data:");
    println!("  inventory records: {}", counts.inventory);
    println!("  orders: {}", counts.orders);

    if counts.is_empty() {
        println!("Database is already clean");
        return Ok(());
    }

    if !cli.yes && !confirm(counts.inventory, counts.orders).await? {
        println!("Cleanup cancelled");
        return Ok(());
    }

    clear_trading_data(&orm).await?;

    let remaining = trading_data_counts(&orm).await?;
    println!("Cleanup completed:");
    println!("  inventory records: {}", remaining.inventory);
    println!("  orders: {}", remaining.orders);
    Ok(())
}

async fn confirm(inventory: u64, orders: u64) -> anyhow::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(
            format!(
                "This will delete {inventory} inventory records and {orders} orders.\nContinue? (yes/no): "
            )
            .as_bytes(),
        )
        .await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut answer).await?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
