use std::net::{IpAddr, SocketAddr};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rice_trade_api::{
    app::build_app,
    config::{AppConfig, TokenMode},
    db::{create_orm_conn, run_migrations},
    services::auth_service::ensure_default_admin,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rice_trade_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    if config.token_mode == TokenMode::UserId {
        tracing::warn!("AUTH_TOKEN_MODE=user-id: bearer tokens are plain user ids and are not verified");
    }

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    if config.seed_default_admin {
        ensure_default_admin(&orm).await?;
    }

    let addr = SocketAddr::from((config.host.parse::<IpAddr>()?, config.port));
    let app = build_app(AppState::new(orm, config));

    tracing::info!("listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
