//! 健康检查

use axum::{extract::State, response::Json};

use crate::web::types::{AppState, HealthResponse};

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        keys: state.relay.key_count(),
        chunk_size: state.relay.chunk_size(),
    })
}
