use axum::{Json, extract::State};

use crate::{
    error::AppResult,
    response::ApiResponse,
    services::system_service::{self, HealthData, InitDbData, PingData, ServiceInfo},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = ApiResponse<ServiceInfo>),
    ),
    security(()),
    tag = "Health"
)]
pub async fn root(State(state): State<AppState>) -> Json<ApiResponse<ServiceInfo>> {
    Json(system_service::service_info(&state).await)
}

#[utoipa::path(
    get,
    path = "/api/ping",
    responses(
        (status = 200, description = "Liveness probe", body = ApiResponse<PingData>),
    ),
    security(()),
    tag = "Health"
)]
pub async fn ping() -> Json<ApiResponse<PingData>> {
    Json(system_service::ping())
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    security(()),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    Json(system_service::health(&state).await)
}

#[utoipa::path(
    post,
    path = "/api/init-db",
    responses(
        (status = 200, description = "Schema dropped and recreated", body = ApiResponse<InitDbData>),
    ),
    security(()),
    tag = "Health"
)]
pub async fn init_db(State(state): State<AppState>) -> AppResult<Json<ApiResponse<InitDbData>>> {
    let resp = system_service::init_db(&state).await?;
    Ok(Json(resp))
}
