use axum::Json;
use shared::HomeResponse;

pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse::new())
}
