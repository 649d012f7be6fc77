use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    domain::ReportPeriod,
    dto::reports::{InventoryReport, SalesReport},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::{
        extract::ApiQuery,
        params::{InventoryReportQuery, PeriodQuery},
    },
    services::report_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sales", get(sales_report))
        .route("/inventory", get(inventory_report))
}

#[utoipa::path(
    get,
    path = "/api/reports/sales",
    params(
        ("period" = Option<ReportPeriod>, Query, description = "day, week, month (default) or all"),
    ),
    responses(
        (status = 200, description = "Sales over delivered orders", body = ApiResponse<SalesReport>)
    ),
    tag = "Reports"
)]
pub async fn sales_report(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> AppResult<Json<ApiResponse<SalesReport>>> {
    let period = query.period.unwrap_or(ReportPeriod::Month);
    let resp = report_service::sales_report(&state, &user, period).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/reports/inventory",
    params(
        ("scope" = Option<String>, Query, description = "all (default) or mine"),
    ),
    responses(
        (status = 200, description = "Purchases against delivered sales", body = ApiResponse<InventoryReport>)
    ),
    tag = "Reports"
)]
pub async fn inventory_report(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<InventoryReportQuery>,
) -> AppResult<Json<ApiResponse<InventoryReport>>> {
    let resp = report_service::inventory_report(&state, &user, query.scope.unwrap_or_default()).await?;
    Ok(Json(resp))
}
