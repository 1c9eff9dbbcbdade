use axum::Json;
use shared::HealthResponse;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
