use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod auth;
pub mod customers;
pub mod doc;
pub mod extract;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod params;
pub mod reports;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(health::ping))
        .route("/health", get(health::health_check))
        .route("/init-db", post(health::init_db))
        .nest("/auth", auth::router())
        .nest("/inventory", inventory::router())
        .nest("/customers", customers::router())
        .nest("/orders", orders::router())
        .nest("/reports", reports::router())
}
