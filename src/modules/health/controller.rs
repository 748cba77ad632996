use axum::Json;
use bharat_core::ApiResponse;
use serde::Serialize;
use utoipa::ToSchema;

/// Serializes as `{}`.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct HealthStatus {}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = ApiResponse<HealthStatus>)
    ),
    tag = "Health"
)]
pub async fn health() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(HealthStatus::default()))
}
