//! Web 路由定义

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::{handlers::*, types::AppState};

/// 创建路由结构
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/extract", post(extract_story))
        .route("/translate", post(translate_text))
        .route("/health", get(health))
}
