use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    domain::ReportPeriod,
    dto::inventory::{AddInventoryRequest, InventoryHistory, InventoryStatus, UpdateInventoryRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::InventoryRecord,
    response::ApiResponse,
    routes::{
        extract::{ApiJson, ApiPath, ApiQuery},
        params::PeriodQuery,
    },
    services::inventory_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_inventory).post(add_inventory))
        .route("/history", get(inventory_history))
        .route("/{id}", put(update_inventory))
}

#[utoipa::path(
    get,
    path = "/api/inventory",
    responses(
        (status = 200, description = "Current stock position", body = ApiResponse<InventoryStatus>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Inventory"
)]
pub async fn get_inventory(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<InventoryStatus>>> {
    let resp = inventory_service::get_inventory(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = AddInventoryRequest,
    responses(
        (status = 201, description = "Stock added", body = ApiResponse<InventoryRecord>),
        (status = 400, description = "Bags must be positive")
    ),
    tag = "Inventory"
)]
pub async fn add_inventory(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<AddInventoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<InventoryRecord>>)> {
    let resp = inventory_service::add_inventory(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/inventory/history",
    params(
        ("period" = Option<ReportPeriod>, Query, description = "day, week, month or all (default all)"),
    ),
    responses(
        (status = 200, description = "Stock additions, newest first", body = ApiResponse<InventoryHistory>)
    ),
    tag = "Inventory"
)]
pub async fn inventory_history(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> AppResult<Json<ApiResponse<InventoryHistory>>> {
    let period = query.period.unwrap_or(ReportPeriod::All);
    let resp = inventory_service::inventory_history(&state, &user, period).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    params(("id" = i32, Path, description = "Inventory record id")),
    request_body = UpdateInventoryRequest,
    responses(
        (status = 200, description = "Record updated", body = ApiResponse<InventoryRecord>),
        (status = 404, description = "Inventory record not found")
    ),
    tag = "Inventory"
)]
pub async fn update_inventory(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateInventoryRequest>,
) -> AppResult<Json<ApiResponse<InventoryRecord>>> {
    let resp = inventory_service::update_inventory(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
